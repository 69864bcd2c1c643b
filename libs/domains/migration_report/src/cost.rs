//! Cost estimation over collected compute resources.
//!
//! Hourly costs come from the spec records; derived daily and monthly
//! figures use a fixed 24-hour day and 30-day month.

use std::collections::BTreeMap;

use crate::normalize::provider_tag;
use crate::report::{ComputeResources, CostByRegion, CostByVm, CostEstimation, ReportSpec, CURRENCY};

pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_MONTH: f64 = 30.0;

pub fn daily(hourly: f64) -> f64 {
    hourly * HOURS_PER_DAY
}

pub fn monthly(hourly: f64) -> f64 {
    hourly * HOURS_PER_DAY * DAYS_PER_MONTH
}

/// Running totals for one region, finalized once every VM is folded in
#[derive(Debug, Default)]
struct RegionAccumulator {
    csp: String,
    vm_count: usize,
    cost_per_hour: f64,
}

impl RegionAccumulator {
    fn finish(self, region: String) -> CostByRegion {
        CostByRegion {
            csp: self.csp,
            region,
            vm_count: self.vm_count,
            cost_per_month: monthly(self.cost_per_hour),
            cost_per_hour: self.cost_per_hour,
        }
    }
}

/// Hourly cost of a spec short name; the first matching spec wins, no match costs zero
fn hourly_cost(specs: &[ReportSpec], spec_short_name: &str) -> f64 {
    specs
        .iter()
        .find(|spec| spec.short_name == spec_short_name)
        .map(|spec| spec.cost_per_hour)
        .unwrap_or_default()
}

/// Per-VM, per-region and total cost rollups
pub fn estimate(compute: &ComputeResources) -> CostEstimation {
    let by_vm: Vec<CostByVm> = compute
        .vms
        .iter()
        .map(|vm| {
            let cost_per_hour = hourly_cost(&compute.specs, &vm.spec.name);
            CostByVm {
                vm_name: vm.name.clone(),
                spec_name: vm.spec.name.clone(),
                cost_per_hour,
                cost_per_month: monthly(cost_per_hour),
            }
        })
        .collect();

    let regions = compute.vms.iter().zip(&by_vm).fold(
        BTreeMap::<String, RegionAccumulator>::new(),
        |mut regions, (vm, cost)| {
            let entry = regions
                .entry(vm.region.clone())
                .or_insert_with(|| RegionAccumulator {
                    csp: provider_tag(&vm.misc.connection_name),
                    ..Default::default()
                });
            entry.vm_count += 1;
            entry.cost_per_hour += cost.cost_per_hour;
            regions
        },
    );

    let by_region: Vec<CostByRegion> = regions
        .into_iter()
        .map(|(region, acc)| acc.finish(region))
        .collect();

    let total_cost_per_hour: f64 = by_vm.iter().map(|vm| vm.cost_per_hour).sum();

    CostEstimation {
        currency: CURRENCY.to_string(),
        total_cost_per_hour,
        total_cost_per_day: daily(total_cost_per_hour),
        total_cost_per_month: monthly(total_cost_per_hour),
        by_region,
        by_vm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportVm, ReportVmImage, ReportVmMisc, ReportVmSpec};

    fn spec(short_name: &str, cost_per_hour: f64) -> ReportSpec {
        ReportSpec {
            id: format!("aws+us-east-1+{}", short_name),
            name: short_name.to_string(),
            short_name: short_name.to_string(),
            provider: "aws".to_string(),
            region: "us-east-1".to_string(),
            vcpus: 2,
            memory_gib: 4.0,
            architecture: "x86_64".to_string(),
            cost_per_hour,
            usage_count: 1,
        }
    }

    fn vm(name: &str, spec_name: &str, region: &str, connection: &str) -> ReportVm {
        ReportVm {
            name: name.to_string(),
            csp_vm_id: String::new(),
            status: "Running".to_string(),
            spec: ReportVmSpec {
                name: spec_name.to_string(),
                ..Default::default()
            },
            image: ReportVmImage::default(),
            misc: ReportVmMisc {
                connection_name: connection.to_string(),
                ..Default::default()
            },
            region: region.to_string(),
            zone: String::new(),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_compute_yields_zero_estimation() {
        let estimation = estimate(&ComputeResources::default());

        assert_eq!(estimation.currency, "USD");
        assert_eq!(estimation.total_cost_per_hour, 0.0);
        assert_eq!(estimation.total_cost_per_day, 0.0);
        assert_eq!(estimation.total_cost_per_month, 0.0);
        assert!(estimation.by_region.is_empty());
        assert!(estimation.by_vm.is_empty());
    }

    #[test]
    fn test_totals_and_per_vm_costs() {
        let compute = ComputeResources {
            specs: vec![spec("t3.micro", 0.0104), spec("m5.large", 0.096)],
            images: vec![],
            vms: vec![
                vm("web-1", "t3.micro", "us-east-1", "aws-us-east-1"),
                vm("db-1", "m5.large", "us-east-1", "aws-us-east-1"),
            ],
        };

        let estimation = estimate(&compute);

        assert!(approx(estimation.total_cost_per_hour, 0.1064));
        assert!(approx(estimation.total_cost_per_day, 0.1064 * 24.0));
        assert!(approx(estimation.total_cost_per_month, 0.1064 * 720.0));
        assert_eq!(estimation.by_vm[1].vm_name, "db-1");
        assert!(approx(estimation.by_vm[1].cost_per_month, 0.096 * 720.0));
    }

    #[test]
    fn test_unmatched_spec_costs_zero() {
        let compute = ComputeResources {
            specs: vec![spec("t3.micro", 0.0104)],
            images: vec![],
            vms: vec![vm("vm-1", "unknown.size", "us-east-1", "aws-us-east-1")],
        };

        let estimation = estimate(&compute);

        assert_eq!(estimation.by_vm[0].cost_per_hour, 0.0);
        assert_eq!(estimation.total_cost_per_hour, 0.0);
        assert_eq!(estimation.by_region[0].vm_count, 1);
    }

    #[test]
    fn test_first_matching_spec_wins() {
        let compute = ComputeResources {
            specs: vec![spec("t3.micro", 0.01), spec("t3.micro", 0.5)],
            images: vec![],
            vms: vec![vm("vm-1", "t3.micro", "us-east-1", "aws-us-east-1")],
        };

        assert!(approx(estimate(&compute).total_cost_per_hour, 0.01));
    }

    #[test]
    fn test_region_rollup_groups_and_tags_provider() {
        let compute = ComputeResources {
            specs: vec![spec("t3.micro", 0.01), spec("n2-standard-2", 0.1)],
            images: vec![],
            vms: vec![
                vm("a", "t3.micro", "us-east-1", "aws-us-east-1"),
                vm("b", "t3.micro", "us-east-1", "aws-us-east-1"),
                vm("c", "n2-standard-2", "asia-northeast3", "gcp-asia-northeast3"),
            ],
        };

        let estimation = estimate(&compute);

        assert_eq!(estimation.by_region.len(), 2);
        let gcp = &estimation.by_region[0];
        assert_eq!(gcp.region, "asia-northeast3");
        assert_eq!(gcp.csp, "GCP");
        assert_eq!(gcp.vm_count, 1);

        let aws = &estimation.by_region[1];
        assert_eq!(aws.csp, "AWS");
        assert_eq!(aws.vm_count, 2);
        assert!(approx(aws.cost_per_hour, 0.02));
        assert!(approx(aws.cost_per_month, 0.02 * 720.0));
    }

    #[test]
    fn test_region_hourly_totals_sum_to_total() {
        let compute = ComputeResources {
            specs: vec![spec("s", 0.0417), spec("m", 0.1234), spec("l", 0.377)],
            images: vec![],
            vms: vec![
                vm("1", "s", "r1", "aws-r1"),
                vm("2", "m", "r2", "azure-r2"),
                vm("3", "l", "r1", "aws-r1"),
                vm("4", "x", "r3", "gcp-r3"),
                vm("5", "m", "r2", "azure-r2"),
            ],
        };

        let estimation = estimate(&compute);
        let region_sum: f64 = estimation.by_region.iter().map(|r| r.cost_per_hour).sum();

        assert!(approx(region_sum, estimation.total_cost_per_hour));
    }
}
