//! Tile-to-device bindings scoped to a single fence.

use std::collections::BTreeMap;

/// The bindings of one fence: tile identifier (name or uuid) mapped to an
/// optional presence device id.
///
/// Inclusion fences carry a device id for every entry; exclusion fences
/// list bare tile identifiers, since an exclusion zone only suppresses
/// evaluation and never commands a device.
#[derive(Debug, Clone, Default)]
pub struct BindingSet {
    bindings: BTreeMap<String, Option<u32>>,
}

/// A binding matched for a specific tracked tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBinding<'a> {
    /// The identifier that matched (the tile's name or its uuid).
    pub key: &'a str,
    /// Bound device id; `None` for exclusion-fence bindings.
    pub device_id: Option<u32>,
}

impl BindingSet {
    /// Build from an inclusion-fence mapping of tile id to device id.
    pub fn from_device_map(tiles: &BTreeMap<String, u32>) -> Self {
        Self {
            bindings: tiles
                .iter()
                .map(|(tile, device_id)| (tile.clone(), Some(*device_id)))
                .collect(),
        }
    }

    /// Build from an exclusion-fence list of bare tile ids.
    pub fn from_tile_list(tiles: &[String]) -> Self {
        Self {
            bindings: tiles.iter().map(|tile| (tile.clone(), None)).collect(),
        }
    }

    /// True if no tile is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of bound tiles.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// All bound tile identifiers.
    pub fn tile_ids(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// All bound device ids (empty for exclusion fences).
    pub fn device_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.bindings.values().filter_map(|id| *id)
    }

    /// Look up a single identifier.
    pub fn get(&self, key: &str) -> Option<ResolvedBinding<'_>> {
        self.bindings
            .get_key_value(key)
            .map(|(key, device_id)| ResolvedBinding {
                key: key.as_str(),
                device_id: *device_id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device_map(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
        entries
            .iter()
            .map(|(tile, id)| (tile.to_string(), *id))
            .collect()
    }

    #[test]
    fn test_from_device_map_keeps_ids() {
        let set = BindingSet::from_device_map(&device_map(&[("keys", 34), ("wallet", 35)]));

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("keys").unwrap().device_id, Some(34));
        assert_eq!(set.get("wallet").unwrap().device_id, Some(35));
        assert_eq!(set.device_ids().collect::<Vec<_>>(), vec![34, 35]);
    }

    #[test]
    fn test_from_tile_list_has_no_ids() {
        let set = BindingSet::from_tile_list(&["keys".to_string(), "wallet".to_string()]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("keys").unwrap().device_id, None);
        assert_eq!(set.device_ids().count(), 0);
    }

    #[test]
    fn test_get_misses_unknown_tile() {
        let set = BindingSet::from_tile_list(&["keys".to_string()]);
        assert!(set.get("backpack").is_none());
    }

    #[test]
    fn test_empty_set() {
        let set = BindingSet::default();
        assert!(set.is_empty());
        assert_eq!(set.tile_ids().count(), 0);
    }
}
