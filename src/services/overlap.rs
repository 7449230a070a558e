//! Detección de solapamientos entre reservas
//!
//! Dos intervalos cerrados [s1,e1] y [s2,e2] se solapan si y solo si
//! `s1 <= e2 AND s2 <= e1`. Compartir una frontera (una reserva termina
//! exactamente cuando otra empieza) cuenta como conflicto; el modelo es de
//! intervalo cerrado, no semiabierto. Solo las reservas activas (pending o
//! confirmed) participan en la detección.

use chrono::{DateTime, Utc};

use crate::models::reservation::{Reservation, ReservationStatus};

/// Test de intersección de intervalos cerrados
pub fn intervals_overlap(
    start_a: DateTime<Utc>,
    end_a: DateTime<Utc>,
    start_b: DateTime<Utc>,
    end_b: DateTime<Utc>,
) -> bool {
    start_a <= end_b && start_b <= end_a
}

/// Filtrar las reservas activas que chocan con el rango candidato
///
/// Devuelve todas las que chocan, no solo la primera, para que el caller
/// pueda presentarlas al usuario.
pub fn find_conflicts<'a>(
    reservations: &'a [Reservation],
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
) -> Vec<&'a Reservation> {
    reservations
        .iter()
        .filter(|r| {
            ReservationStatus::parse(&r.status).map_or(false, |status| status.is_active())
        })
        .filter(|r| intervals_overlap(r.start_date, r.end_date, candidate_start, candidate_end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn day(offset: i64) -> DateTime<Utc> {
        Utc::now() + Duration::days(offset)
    }

    fn reservation(start: DateTime<Utc>, end: DateTime<Utc>, status: &str) -> Reservation {
        let now = Utc::now();
        Reservation {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            start_date: start,
            end_date: end,
            reason: "viaje".to_string(),
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_disjoint_intervals_do_not_overlap() {
        assert!(!intervals_overlap(day(1), day(2), day(3), day(4)));
        assert!(!intervals_overlap(day(3), day(4), day(1), day(2)));
    }

    #[test]
    fn test_partial_overlap() {
        assert!(intervals_overlap(day(1), day(3), day(2), day(4)));
        assert!(intervals_overlap(day(2), day(4), day(1), day(3)));
    }

    #[test]
    fn test_contained_interval_overlaps() {
        assert!(intervals_overlap(day(1), day(10), day(3), day(4)));
        assert!(intervals_overlap(day(3), day(4), day(1), day(10)));
    }

    #[test]
    fn test_touching_boundary_counts_as_overlap() {
        // intervalo cerrado: terminar cuando el otro empieza es conflicto
        let boundary = day(2);
        assert!(intervals_overlap(day(1), boundary, boundary, day(3)));
        assert!(intervals_overlap(boundary, day(3), day(1), boundary));
    }

    #[test]
    fn test_find_conflicts_returns_all_active_overlaps() {
        let reservations = vec![
            reservation(day(1), day(3), "confirmed"),
            reservation(day(2), day(5), "pending"),
            reservation(day(10), day(12), "confirmed"),
        ];

        let conflicts = find_conflicts(&reservations, day(2), day(4));
        assert_eq!(conflicts.len(), 2);
    }

    #[test]
    fn test_find_conflicts_ignores_inactive_statuses() {
        let reservations = vec![
            reservation(day(1), day(3), "cancelled"),
            reservation(day(1), day(3), "completed"),
        ];

        let conflicts = find_conflicts(&reservations, day(2), day(4));
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_find_conflicts_with_unknown_status_is_ignored() {
        let reservations = vec![reservation(day(1), day(3), "garbage")];
        assert!(find_conflicts(&reservations, day(2), day(4)).is_empty());
    }
}
