//! Reference extraction: which catalog resources does an infrastructure use?

use std::collections::HashSet;

use crate::models::VmInfo;

/// Unique, unordered set of resource identifiers of one kind
///
/// Empty identifiers are never stored; an empty reference means "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet {
    ids: HashSet<String>,
}

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identifier. Returns false if it was empty or already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        self.ids.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Identifiers in lexical order, for deterministic dispatch
    pub fn sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.iter().collect();
        ids.sort_unstable();
        ids
    }
}

impl<'a> FromIterator<&'a str> for IdSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = IdSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Identifier sets for every resource kind referenced by an infrastructure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceRefs {
    pub vnets: IdSet,
    pub ssh_keys: IdSet,
    pub security_groups: IdSet,
    pub specs: IdSet,
    pub images: IdSet,
}

impl ResourceRefs {
    /// Scan the VM list once and collect every non-empty reference
    pub fn extract(vms: &[VmInfo]) -> Self {
        let mut refs = ResourceRefs::default();

        for vm in vms {
            refs.vnets.insert(&vm.vnet_id);
            refs.ssh_keys.insert(&vm.ssh_key_id);
            for sg_id in &vm.security_group_ids {
                refs.security_groups.insert(sg_id);
            }
            refs.specs.insert(&vm.spec_id);
            refs.images.insert(&vm.image_id);
        }

        refs
    }
}
