//! Region name to leaderboard location resolution.
//!
//! Resolution is best-effort: any failure degrades to the global
//! leaderboard instead of failing the request.

use tracing::{debug, warn};

use crate::models::{Location, LocationId, Region, GLOBAL_LABEL};
use crate::rankings::RankingsClient;

/// The leaderboard a request will be served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub id: LocationId,
    /// Display name, "Global" for the global leaderboard
    pub label: String,
}

impl ResolvedLocation {
    pub fn global() -> Self {
        Self {
            id: LocationId::Global,
            label: GLOBAL_LABEL.to_string(),
        }
    }
}

/// First location whose name matches the region's display name, ignoring case.
pub fn match_location(locations: &[Location], region: Region) -> Option<&Location> {
    locations
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(region.display_name()))
}

/// Resolve an optional region key to a location.
///
/// Unknown keys, `"global"`, an empty string, an upstream failure or a
/// missing match all yield [`ResolvedLocation::global`].
pub async fn resolve_location(
    client: &dyn RankingsClient,
    region: Option<&str>,
) -> ResolvedLocation {
    let Some(region) = region.and_then(Region::parse) else {
        return ResolvedLocation::global();
    };

    let locations = match client.list_locations().await {
        Ok(locations) => locations,
        Err(e) => {
            warn!("Location lookup for {} failed, using global: {}", region, e);
            return ResolvedLocation::global();
        }
    };

    match match_location(&locations, region) {
        Some(location) => {
            debug!("Region {} resolved to location {}", region.key(), location.id);
            ResolvedLocation {
                id: LocationId::Id(location.id),
                label: location.name.clone(),
            }
        }
        None => {
            warn!("No location named {}, using global", region.display_name());
            ResolvedLocation::global()
        }
    }
}
