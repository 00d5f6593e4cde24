//! Venue table and square travel matrices.

use crate::error::{ItineraryError, Result};

/// A venue that can appear in a route.
///
/// `id` doubles as the row/column index in every matrix of the same
/// [`TravelData`]. Coordinates and rating are carried for reporting only;
/// they never enter the cost function.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Venue {
    pub id: usize,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub rating: f64,
}

impl Venue {
    /// Creates a venue with the given id and name, zero coordinates and a
    /// neutral rating.
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lat: 0.0,
            lng: 0.0,
            rating: 0.0,
        }
    }

    /// Sets the coordinates.
    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.lat = lat;
        self.lng = lng;
        self
    }

    /// Sets the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }
}

/// Dense n×n matrix stored row-major.
///
/// Not required to be symmetric. Non-finite entries mark unreachable pairs.
///
/// # Examples
///
/// ```
/// use u_itinerary::matrix::SquareMatrix;
///
/// let m = SquareMatrix::from_rows(vec![vec![0.0, 5.0], vec![4.0, 0.0]]).unwrap();
/// assert_eq!(m.len(), 2);
/// assert_eq!(m.get(0, 1), 5.0);
/// assert_eq!(m.get(1, 0), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    /// Builds a matrix from rows. Fails if any row length differs from the
    /// number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(ItineraryError::Dimension(format!(
                    "row {i} has {} columns, expected {n}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Self { n, data })
    }

    /// Builds an n×n matrix by calling `f(i, j)` for every cell.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                data.push(f(i, j));
            }
        }
        Self { n, data }
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Value at row `i`, column `j`.
    ///
    /// Indices are checked in debug builds only; callers validate ids up
    /// front.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.n && j < self.n, "index ({i}, {j}) out of range for {n}x{n}", n = self.n);
        self.data[i * self.n + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Whether `m[i][j] == m[j][i]` for every pair (within `tol`).
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.n).all(|i| {
            ((i + 1)..self.n).all(|j| {
                let (a, b) = (self.get(i, j), self.get(j, i));
                a == b || (a - b).abs() <= tol
            })
        })
    }

    /// Sum of `m[route[k]][route[k+1]]` over consecutive pairs.
    ///
    /// With `closed = true` the leg from the last element back to the first
    /// is included.
    pub fn path_length(&self, route: &[usize], closed: bool) -> f64 {
        let mut total: f64 = route.windows(2).map(|w| self.get(w[0], w[1])).sum();
        if closed && route.len() > 1 {
            total += self.get(route[route.len() - 1], route[0]);
        }
        total
    }
}

/// Venue table plus distance and time matrices, all indexed by venue id.
///
/// Construction checks that the three agree on size and that venue ids
/// match their positions, so every later index lookup is in range.
#[derive(Debug, Clone)]
pub struct TravelData {
    venues: Vec<Venue>,
    distance: SquareMatrix,
    time: SquareMatrix,
}

impl TravelData {
    /// Bundles venues with their distance (arbitrary unit) and travel time
    /// (minutes) matrices.
    pub fn new(venues: Vec<Venue>, distance: SquareMatrix, time: SquareMatrix) -> Result<Self> {
        let n = venues.len();
        if distance.len() != n || time.len() != n {
            return Err(ItineraryError::Dimension(format!(
                "{n} venues but distance matrix is {d}x{d} and time matrix is {t}x{t}",
                d = distance.len(),
                t = time.len()
            )));
        }
        if let Some((pos, v)) = venues.iter().enumerate().find(|(pos, v)| v.id != *pos) {
            return Err(ItineraryError::Dimension(format!(
                "venue at position {pos} has id {}, ids must equal matrix indices",
                v.id
            )));
        }
        Ok(Self {
            venues,
            distance,
            time,
        })
    }

    /// Number of venues.
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn venue(&self, id: usize) -> Option<&Venue> {
        self.venues.get(id)
    }

    /// Distance matrix.
    pub fn distance(&self) -> &SquareMatrix {
        &self.distance
    }

    /// Travel time matrix, in minutes.
    pub fn time(&self) -> &SquareMatrix {
        &self.time
    }

    /// Builds a starting visit order: `start` first, then every other venue
    /// rated at least `min_rating`, in id order.
    ///
    /// The start venue is kept even if it falls below the rating threshold.
    pub fn initial_route(&self, start: usize, min_rating: Option<f64>) -> Result<Vec<usize>> {
        if start >= self.len() {
            return Err(ItineraryError::Dimension(format!(
                "start venue {start} outside venue table of {}",
                self.len()
            )));
        }
        let mut route = Vec::with_capacity(self.len());
        route.push(start);
        route.extend(
            self.venues
                .iter()
                .filter(|v| v.id != start)
                .filter(|v| min_rating.map_or(true, |min| v.rating >= min))
                .map(|v| v.id),
        );
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(n: usize) -> TravelData {
        let venues = (0..n)
            .map(|i| Venue::new(i, format!("v{i}")).with_rating(3.0 + i as f64 * 0.5))
            .collect();
        let d = SquareMatrix::from_fn(n, |i, j| (i as f64 - j as f64).abs());
        let t = SquareMatrix::from_fn(n, |i, j| if i == j { 0.0 } else { 10.0 });
        TravelData::new(venues, d, t).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = SquareMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, ItineraryError::Dimension(_)));
    }

    #[test]
    fn test_from_rows_empty() {
        let m = SquareMatrix::from_rows(vec![]).unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn test_symmetry() {
        let sym = SquareMatrix::from_fn(3, |i, j| (i + j) as f64);
        assert!(sym.is_symmetric(0.0));
        let asym = SquareMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap();
        assert!(!asym.is_symmetric(1e-9));
    }

    #[test]
    fn test_path_length() {
        let m = SquareMatrix::from_fn(4, |i, j| (i as f64 - j as f64).abs());
        assert_eq!(m.path_length(&[0, 1, 3], false), 3.0);
        assert_eq!(m.path_length(&[0, 1, 3], true), 6.0);
        assert_eq!(m.path_length(&[2], true), 0.0);
    }

    #[test]
    fn test_row_is_row_major() {
        let m = SquareMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap();
        assert_eq!(m.row(0), &[0.0, 1.0]);
        assert_eq!(m.row(1), &[2.0, 0.0]);
    }

    #[test]
    fn test_venue_lookup() {
        let d = data(3);
        assert_eq!(d.venue(2).map(|v| v.name.as_str()), Some("v2"));
        assert!(d.venue(3).is_none());
    }

    #[test]
    fn test_travel_data_size_mismatch() {
        let venues = vec![Venue::new(0, "a"), Venue::new(1, "b")];
        let d = SquareMatrix::from_fn(2, |_, _| 1.0);
        let t = SquareMatrix::from_fn(3, |_, _| 1.0);
        assert!(matches!(
            TravelData::new(venues, d, t),
            Err(ItineraryError::Dimension(_))
        ));
    }

    #[test]
    fn test_travel_data_rejects_misnumbered_venues() {
        let venues = vec![Venue::new(1, "a"), Venue::new(0, "b")];
        let m = SquareMatrix::from_fn(2, |_, _| 1.0);
        assert!(TravelData::new(venues, m.clone(), m).is_err());
    }

    #[test]
    fn test_initial_route_puts_start_first() {
        let d = data(5);
        assert_eq!(d.initial_route(3, None).unwrap(), vec![3, 0, 1, 2, 4]);
    }

    #[test]
    fn test_initial_route_rating_filter() {
        // ratings: 3.0, 3.5, 4.0, 4.5, 5.0
        let d = data(5);
        assert_eq!(d.initial_route(0, Some(4.0)).unwrap(), vec![0, 2, 3, 4]);
    }

    #[test]
    fn test_initial_route_bad_start() {
        assert!(matches!(
            data(3).initial_route(7, None),
            Err(ItineraryError::Dimension(_))
        ));
    }
}
