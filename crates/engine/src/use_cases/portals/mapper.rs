//! Provider portal -> wire position.

use warpgate_domain::PortalSource;
use warpgate_shared::{PortalPositionData, PositionData, TransportData};

use crate::infrastructure::ports::{ProviderPortal, ProviderPosition, ProviderTransport};
use crate::repositories::ReferenceCaches;

/// Translate one provider portal into internal identifier space.
///
/// Identifiers the caches do not know pass through unchanged (the caches log the miss).
/// Absent sub-structures stay absent. A missing or negative use count becomes `0`.
pub fn map_portal(portal: &ProviderPortal, caches: &ReferenceCaches) -> PortalPositionData {
    PortalPositionData {
        server_id: caches.servers.resolve_id(&portal.server),
        dimension_id: caches.dimensions.resolve_id(&portal.dimension),
        position: portal
            .position
            .as_ref()
            .map(|position| map_position(position, caches)),
        remaining_uses: portal
            .remaining_uses
            .map(|uses| u32::try_from(uses.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(0),
        created_by: portal.created_by.as_ref().map(|user| user.name.clone()),
        created_at: portal.created_at,
        updated_by: portal.updated_by.as_ref().map(|user| user.name.clone()),
        updated_at: portal.updated_at,
        source: PortalSource::dofus_portals(),
    }
}

fn map_position(position: &ProviderPosition, caches: &ReferenceCaches) -> PositionData {
    PositionData {
        x: position.x,
        y: position.y,
        is_in_canopy: position.is_in_canopy.unwrap_or(false),
        transport: position
            .transport
            .as_ref()
            .map(|transport| map_transport(transport, caches)),
        conditional_transport: position
            .conditional_transport
            .as_ref()
            .map(|transport| map_transport(transport, caches)),
    }
}

fn map_transport(transport: &ProviderTransport, caches: &ReferenceCaches) -> TransportData {
    TransportData {
        area_id: caches.areas.resolve_id(&transport.area),
        sub_area_id: caches.sub_areas.resolve_id(&transport.sub_area),
        type_id: caches.transport_types.resolve_id(&transport.transport_type),
        x: transport.x,
        y: transport.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::LookupCache;
    use crate::infrastructure::ports::ProviderUser;
    use chrono::{TimeZone, Utc};
    use warpgate_domain::{Area, Dimension, Server, SubArea, TransportType};

    fn caches() -> ReferenceCaches {
        ReferenceCaches {
            servers: LookupCache::build([Server::new("djaul", "1")]),
            dimensions: LookupCache::build([Dimension::new("enutrosor", "ENU")]),
            areas: LookupCache::build([Area::new("amakna", "a-1")]),
            sub_areas: LookupCache::build([SubArea::new("astrub-city", "sa-1")]),
            transport_types: LookupCache::build([
                TransportType::new("zaap", "ZAAP"),
                TransportType::new("brigandin", "BRIGANDIN"),
            ]),
        }
    }

    fn transport(area: &str, sub_area: &str, kind: &str) -> ProviderTransport {
        ProviderTransport {
            area: area.to_string(),
            sub_area: sub_area.to_string(),
            transport_type: kind.to_string(),
            x: 4,
            y: -18,
        }
    }

    fn bare_portal() -> ProviderPortal {
        ProviderPortal {
            server: "1".to_string(),
            dimension: "ENU".to_string(),
            position: None,
            remaining_uses: None,
            created_by: None,
            created_at: None,
            updated_by: None,
            updated_at: None,
        }
    }

    #[test]
    fn translates_every_nested_identifier() {
        let created_at = Utc.with_ymd_and_hms(2023, 4, 1, 10, 0, 0).unwrap();
        let portal = ProviderPortal {
            position: Some(ProviderPosition {
                x: -12,
                y: 25,
                is_in_canopy: Some(true),
                transport: Some(transport("a-1", "sa-1", "ZAAP")),
                conditional_transport: Some(transport("a-1", "sa-1", "BRIGANDIN")),
            }),
            remaining_uses: Some(42),
            created_by: Some(ProviderUser {
                name: "Kaelly".to_string(),
            }),
            created_at: Some(created_at),
            ..bare_portal()
        };

        let mapped = map_portal(&portal, &caches());

        assert_eq!(mapped.server_id, "djaul");
        assert_eq!(mapped.dimension_id, "enutrosor");
        assert_eq!(mapped.remaining_uses, 42);
        assert_eq!(mapped.created_by.as_deref(), Some("Kaelly"));
        assert_eq!(mapped.created_at, Some(created_at));
        assert_eq!(mapped.updated_by, None);
        assert_eq!(mapped.source, PortalSource::dofus_portals());

        let position = mapped.position.unwrap();
        assert_eq!((position.x, position.y), (-12, 25));
        assert!(position.is_in_canopy);
        assert_eq!(
            position.transport,
            Some(TransportData {
                area_id: "amakna".to_string(),
                sub_area_id: "astrub-city".to_string(),
                type_id: "zaap".to_string(),
                x: 4,
                y: -18,
            })
        );
        assert_eq!(position.conditional_transport.unwrap().type_id, "brigandin");
    }

    #[test]
    fn unknown_identifiers_pass_through() {
        let portal = ProviderPortal {
            server: "99".to_string(),
            dimension: "XEL".to_string(),
            position: Some(ProviderPosition {
                x: 0,
                y: 0,
                is_in_canopy: None,
                transport: Some(transport("a-404", "sa-1", "SHIP")),
                conditional_transport: None,
            }),
            ..bare_portal()
        };

        let mapped = map_portal(&portal, &caches());

        assert_eq!(mapped.server_id, "99");
        assert_eq!(mapped.dimension_id, "XEL");
        let position = mapped.position.unwrap();
        assert!(!position.is_in_canopy);
        assert!(position.conditional_transport.is_none());
        let transport = position.transport.unwrap();
        assert_eq!(transport.area_id, "a-404");
        assert_eq!(transport.sub_area_id, "astrub-city");
        assert_eq!(transport.type_id, "SHIP");
    }

    #[test]
    fn remaining_uses_is_never_negative() {
        let caches = caches();

        let absent = map_portal(&bare_portal(), &caches);
        let negative = map_portal(
            &ProviderPortal {
                remaining_uses: Some(-3),
                ..bare_portal()
            },
            &caches,
        );

        assert_eq!(absent.remaining_uses, 0);
        assert_eq!(negative.remaining_uses, 0);
        assert!(absent.position.is_none());
    }
}
