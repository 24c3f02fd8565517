//! Where published portal positions come from.

use serde::{Deserialize, Serialize};

/// Attribution attached to every portal position we republish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalSource {
    pub name: String,
    pub icon: String,
    pub url: String,
}

impl PortalSource {
    /// The dofus-portals.fr community tracker.
    pub fn dofus_portals() -> Self {
        Self {
            name: "dofus-portals.fr".to_string(),
            icon: "https://i.imgur.com/j8p3M2D.png".to_string(),
            url: "https://dofus-portals.fr".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dofus_portals_source_points_at_the_tracker() {
        let source = PortalSource::dofus_portals();
        assert_eq!(source.name, "dofus-portals.fr");
        assert_eq!(source.url, "https://dofus-portals.fr");
        assert!(source.icon.starts_with("https://"));
    }
}
