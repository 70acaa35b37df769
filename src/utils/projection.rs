//! Proyección de coordenadas GPS al mapa
//!
//! Interpolación lineal de (latitud, longitud) a porcentajes del contenedor,
//! con el norte arriba. El resultado se recorta a `[5, 95]` para que ningún
//! marcador quede pegado al borde; las coordenadas fuera de rango se
//! recortan en vez de descartarse.

use serde::Serialize;

use crate::models::GpsLocation;

pub const MARGIN_MIN: f64 = 5.0;
pub const MARGIN_MAX: f64 = 95.0;

/// Rectángulo geográfico representado por el mapa
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Extensión simplificada de Ecuador continental
pub const ECUADOR_BOUNDS: MapBounds = MapBounds {
    min_lat: -4.5,
    max_lat: 1.5,
    min_lng: -81.5,
    max_lng: -75.0,
};

impl Default for MapBounds {
    fn default() -> Self {
        ECUADOR_BOUNDS
    }
}

/// Posición del marcador en porcentaje del contenedor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

/// Marcador listo para dibujar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub plate: String,
    pub position: MapPosition,
}

impl MapBounds {
    pub fn project(&self, lat: f64, lng: f64) -> MapPosition {
        let x = (lng - self.min_lng) / (self.max_lng - self.min_lng) * 100.0;
        let y = (self.max_lat - lat) / (self.max_lat - self.min_lat) * 100.0;
        MapPosition {
            x: clamp_margin(x),
            y: clamp_margin(y),
        }
    }

    pub fn markers<'a, I>(&self, locations: I) -> Vec<MapMarker>
    where
        I: IntoIterator<Item = &'a GpsLocation>,
    {
        locations
            .into_iter()
            .map(|location| MapMarker {
                id: location.id.clone(),
                plate: location.plate.clone(),
                position: self.project(location.lat, location.lng),
            })
            .collect()
    }
}

/// `f64::max` descarta NaN, así que un NaN termina en el borde inferior
fn clamp_margin(value: f64) -> f64 {
    value.max(MARGIN_MIN).min(MARGIN_MAX)
}

pub fn project(lat: f64, lng: f64) -> MapPosition {
    ECUADOR_BOUNDS.project(lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_margin(p: MapPosition) -> bool {
        (MARGIN_MIN..=MARGIN_MAX).contains(&p.x) && (MARGIN_MIN..=MARGIN_MAX).contains(&p.y)
    }

    #[test]
    fn test_minimum_bounds_project_to_bottom_left() {
        let b = ECUADOR_BOUNDS;
        assert_eq!(project(b.min_lat, b.min_lng), MapPosition { x: 5.0, y: 95.0 });
        assert_eq!(project(b.max_lat, b.max_lng), MapPosition { x: 95.0, y: 5.0 });
    }

    #[test]
    fn test_center_is_linear() {
        let p = project(-1.5, -78.25);
        assert!((p.x - 50.0).abs() < 1e-9);
        assert!((p.y - 50.0).abs() < 1e-9);

        // Base Naval Sur - Guayaquil
        let guayaquil = project(-2.2087, -79.9079);
        assert!((guayaquil.x - 24.493846).abs() < 1e-4);
        assert!((guayaquil.y - 61.811667).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_range_and_degenerate_inputs_are_clamped() {
        assert_eq!(project(-90.0, -180.0), MapPosition { x: 5.0, y: 95.0 });
        assert_eq!(project(90.0, 180.0), MapPosition { x: 95.0, y: 5.0 });
        assert_eq!(project(f64::INFINITY, f64::NEG_INFINITY), MapPosition { x: 5.0, y: 5.0 });
        assert!(in_margin(project(f64::NAN, f64::NAN)));
    }

    #[test]
    fn test_projection_is_bounded_and_monotonic() {
        let b = ECUADOR_BOUNDS;
        let steps = 40;
        let mut last_x = f64::MIN;
        let mut last_y = f64::MAX;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let lat = b.min_lat - 1.0 + t * (b.max_lat - b.min_lat + 2.0);
            let lng = b.min_lng - 1.0 + t * (b.max_lng - b.min_lng + 2.0);
            let p = project(lat, lng);
            assert!(in_margin(p), "{:?} fuera de margen", p);
            assert!(p.x >= last_x);
            // Al subir la latitud el marcador sube (y decrece)
            let y_for_lat = project(lat, b.min_lng).y;
            assert!(y_for_lat <= last_y);
            last_x = p.x;
            last_y = y_for_lat;
        }
    }
}
