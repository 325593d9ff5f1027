//! Fixed-capacity panel registry
//!
//! A [`PanelRegistry`] for hosts without an allocator. Ids are handed out
//! in increasing order and never reused while the list lives.

use heapless::Vec;

use super::{PanelId, PanelInfo};
use crate::error::Error;
use crate::traits::PanelRegistry;

/// Registry holding up to `N` panels
#[derive(Debug, Clone)]
pub struct PanelList<const N: usize> {
    panels: Vec<(PanelId, PanelInfo), N>,
    next_id: u16,
}

impl<const N: usize> Default for PanelList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PanelList<N> {
    pub const fn new() -> Self {
        Self {
            panels: Vec::new(),
            next_id: 0,
        }
    }

    /// Look up a registered panel
    pub fn get(&self, id: PanelId) -> Option<&PanelInfo> {
        self.panels
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, info)| info)
    }

    /// Find the panel registered for a device
    pub fn find_by_device(&self, device: &str) -> Option<PanelId> {
        self.panels
            .iter()
            .find(|(_, info)| info.device.as_str() == device)
            .map(|(id, _)| *id)
    }

    /// Iterate registered panels in registration order
    pub fn iter(&self) -> impl Iterator<Item = (PanelId, &PanelInfo)> {
        self.panels.iter().map(|(id, info)| (*id, info))
    }
}

impl<const N: usize> PanelRegistry for PanelList<N> {
    fn add(&mut self, info: PanelInfo) -> Result<PanelId, Error> {
        if self.find_by_device(&info.device).is_some() {
            return Err(Error::Busy);
        }

        let id = PanelId(self.next_id);
        self.panels
            .push((id, info))
            .map_err(|_| Error::NoMemory)?;
        self.next_id = self.next_id.wrapping_add(1);
        Ok(id)
    }

    fn remove(&mut self, id: PanelId) {
        self.panels.retain(|(pid, _)| *pid != id);
    }

    fn contains(&self, id: PanelId) -> bool {
        self.get(id).is_some()
    }

    fn len(&self) -> usize {
        self.panels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::ConnectorType;

    fn info(device: &str) -> PanelInfo {
        PanelInfo::new(device, ConnectorType::Dsi).unwrap()
    }

    #[test]
    fn test_add_and_remove() {
        let mut list = PanelList::<4>::new();
        assert!(list.is_empty());

        let a = list.add(info("dsi0.0")).unwrap();
        let b = list.add(info("dsi1.0")).unwrap();
        assert_ne!(a, b);
        assert_eq!(list.len(), 2);
        assert_eq!(list.find_by_device("dsi1.0"), Some(b));

        list.remove(a);
        assert!(!list.contains(a));
        assert!(list.contains(b));
        assert_eq!(list.iter().count(), 1);
    }

    #[test]
    fn test_ids_not_reused() {
        let mut list = PanelList::<2>::new();
        let a = list.add(info("dsi0.0")).unwrap();
        list.remove(a);

        let b = list.add(info("dsi0.0")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_duplicate_device_rejected() {
        let mut list = PanelList::<2>::new();
        list.add(info("dsi0.0")).unwrap();
        assert_eq!(list.add(info("dsi0.0")), Err(Error::Busy));
    }

    #[test]
    fn test_full_list() {
        let mut list = PanelList::<1>::new();
        list.add(info("dsi0.0")).unwrap();
        assert_eq!(list.add(info("dsi1.0")), Err(Error::NoMemory));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_unknown_is_ignored() {
        let mut list = PanelList::<2>::new();
        list.add(info("dsi0.0")).unwrap();
        list.remove(PanelId(42));
        assert_eq!(list.len(), 1);
    }
}
