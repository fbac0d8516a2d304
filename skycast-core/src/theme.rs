use crate::store::{KvStore, StoreError};

/// Store key holding the theme preference, `"true"` when dark.
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Read the persisted preference; anything other than `"true"` is light.
    pub fn load(store: &dyn KvStore) -> Self {
        match store.get(DARK_MODE_KEY) {
            Ok(Some(raw)) if raw == "true" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn save(self, store: &dyn KvStore) -> Result<(), StoreError> {
        let raw = match self {
            Theme::Light => "false",
            Theme::Dark => "true",
        };
        store.set(DARK_MODE_KEY, raw)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_to_light_when_unset() {
        let store = MemoryStore::new();
        assert_eq!(Theme::load(&store), Theme::Light);
    }

    #[test]
    fn toggle_round_trips_through_the_store() {
        let store = MemoryStore::new();

        let theme = Theme::load(&store).toggled();
        theme.save(&store).expect("save");
        assert_eq!(store.get(DARK_MODE_KEY).expect("get").as_deref(), Some("true"));
        assert_eq!(Theme::load(&store), Theme::Dark);

        let theme = Theme::load(&store).toggled();
        theme.save(&store).expect("save");
        assert_eq!(store.get(DARK_MODE_KEY).expect("get").as_deref(), Some("false"));
        assert_eq!(Theme::load(&store), Theme::Light);
    }

    #[test]
    fn unexpected_persisted_value_falls_back_to_light() {
        let store = MemoryStore::new();
        store.set(DARK_MODE_KEY, "definitely").expect("set");

        assert_eq!(Theme::load(&store), Theme::Light);
    }
}
