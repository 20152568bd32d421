//! Screen-space grouping of markers.

use cityglobe_types::geo::{GeoPoint2d, Projection, WebMercator};
use cityglobe_types::screen::{MapPoint, PlanarPoint, ScreenPoint};
use cityglobe_types::Size;

use crate::marker::MarkerFeature;
use crate::scene::camera::Camera;

/// Markers drawn as one symbol at the current camera position.
#[derive(Debug, Clone)]
pub(crate) struct ScreenGroup<'a> {
    pub members: Vec<&'a MarkerFeature>,
    pub screen_position: ScreenPoint,
    pub geometry: GeoPoint2d,
}

impl ScreenGroup<'_> {
    pub fn is_cluster(&self) -> bool {
        self.members.len() > 1
    }
}

struct Seed<'a> {
    screen_position: ScreenPoint,
    members: Vec<(&'a MarkerFeature, MapPoint)>,
}

/// Groups visible features greedily: every feature joins the first group whose seed (first
/// member) is within `radius` pixels, otherwise it starts a new group. Features outside of the
/// viewport are dropped. A `radius` of zero or less disables grouping.
pub(crate) fn group_features<'a>(
    features: &'a [MarkerFeature],
    camera: &Camera,
    viewport: Size,
    radius: f64,
) -> Vec<ScreenGroup<'a>> {
    let projection = WebMercator::<GeoPoint2d, MapPoint>::default();
    let Some(center) = projection.project(&camera.center()) else {
        return vec![];
    };

    let mut seeds: Vec<Seed<'a>> = vec![];
    for feature in features {
        let Some(map_point) = projection.project(&feature.position()) else {
            continue;
        };

        let screen_position = camera.map_to_screen(&center, &map_point, viewport);
        if !viewport.contains(&screen_position) {
            continue;
        }

        let seed = if radius > 0.0 {
            seeds
                .iter_mut()
                .find(|seed| seed.screen_position.distance(&screen_position) <= radius)
        } else {
            None
        };

        match seed {
            Some(seed) => seed.members.push((feature, map_point)),
            None => seeds.push(Seed {
                screen_position,
                members: vec![(feature, map_point)],
            }),
        }
    }

    seeds
        .into_iter()
        .map(|seed| {
            if let [(feature, _)] = seed.members.as_slice() {
                return ScreenGroup {
                    members: vec![*feature],
                    screen_position: seed.screen_position,
                    geometry: feature.position(),
                };
            }

            let count = seed.members.len() as f64;
            let (sum_x, sum_y) = seed
                .members
                .iter()
                .fold((0.0, 0.0), |(x, y), (_, p)| (x + p.x, y + p.y));
            let centroid = MapPoint::new(sum_x / count, sum_y / count);
            let geometry = projection
                .unproject(&centroid)
                .unwrap_or_else(|| seed.members[0].0.position());

            ScreenGroup {
                members: seed.members.iter().map(|(feature, _)| *feature).collect(),
                screen_position: camera.map_to_screen(&center, &centroid, viewport),
                geometry,
            }
        })
        .collect()
}
