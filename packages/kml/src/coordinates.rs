//! KML coordinate string parsing.
//!
//! A KML `coordinates` value is a list of `lng,lat[,alt]` tuples separated
//! by spaces, newlines, or carriage returns. Points are returned latitude
//! first, so the two leading fields are swapped on the way in.

use fieldmap_field_models::Point;

const TUPLE_SEPARATORS: [char; 3] = [' ', '\n', '\r'];

/// Parses a whole coordinate string, skipping tuples that do not parse.
///
/// Empty or entirely malformed input yields an empty vector.
#[must_use]
pub fn parse_coordinates(s: &str) -> Vec<Point> {
    s.split(TUPLE_SEPARATORS)
        .filter(|tuple| !tuple.is_empty())
        .filter_map(|tuple| {
            let point = parse_tuple(tuple);
            if point.is_none() {
                log::debug!("Skipping malformed coordinate tuple {tuple:?}");
            }
            point
        })
        .collect()
}

/// Parses one `lng,lat[,alt]` tuple. Any altitude or further fields are
/// ignored.
///
/// Whitespace around each field is ignored. Returns `None` if there are
/// fewer than two fields or either of the first two is not a finite decimal
/// number.
#[must_use]
pub fn parse_tuple(tuple: &str) -> Option<Point> {
    let mut fields = tuple.split(',');
    let lng = parse_degrees(fields.next()?)?;
    let lat = parse_degrees(fields.next()?)?;
    Some(Point::new(lat, lng))
}

fn parse_degrees(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_longitude_and_latitude() {
        let points = parse_coordinates("37.6173,55.7558,0");
        assert_eq!(points, vec![Point::new(55.7558, 37.6173)]);
    }

    #[test]
    fn skips_malformed_middle_tuple() {
        let points = parse_coordinates("1.0,2.0 abc,def 3.0,4.0");
        assert_eq!(points, vec![Point::new(2.0, 1.0), Point::new(4.0, 3.0)]);
    }

    #[test]
    fn splits_on_newlines_and_carriage_returns() {
        let points = parse_coordinates("\r\n  10,20,0\r\n\t30,40,0\n50,60  ");
        assert_eq!(
            points,
            vec![
                Point::new(20.0, 10.0),
                Point::new(40.0, 30.0),
                Point::new(60.0, 50.0),
            ]
        );
    }

    #[test]
    fn keeps_tab_indented_tuples() {
        let points = parse_coordinates(
            "37.600,55.700,0\n\t\t\t\t37.610,55.700,0\n\t\t\t\t37.610,55.706,0\n\t\t\t\t37.600,55.706,0",
        );
        assert_eq!(
            points,
            vec![
                Point::new(55.700, 37.600),
                Point::new(55.700, 37.610),
                Point::new(55.706, 37.610),
                Point::new(55.706, 37.600),
            ]
        );
    }

    #[test]
    fn trims_whitespace_around_fields() {
        assert_eq!(parse_tuple("\t1.5,\t2.5\t"), Some(Point::new(2.5, 1.5)));
    }

    #[test]
    fn ignores_altitude() {
        assert_eq!(parse_tuple("1.5,2.5,300"), Some(Point::new(2.5, 1.5)));
        assert_eq!(parse_tuple("1.5,2.5,300,extra"), Some(Point::new(2.5, 1.5)));
    }

    #[test]
    fn rejects_single_field() {
        assert_eq!(parse_tuple("1.5"), None);
    }

    #[test]
    fn rejects_empty_second_field() {
        assert_eq!(parse_tuple("1.5,"), None);
    }

    #[test]
    fn rejects_unparseable_longitude() {
        assert_eq!(parse_tuple("1;5,2"), None);
        assert_eq!(parse_tuple("abc,2"), None);
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(parse_tuple("NaN,1"), None);
        assert_eq!(parse_tuple("1,inf"), None);
    }

    #[test]
    fn accepts_exponent_and_signs() {
        assert_eq!(parse_tuple("-1e-3,+2.5"), Some(Point::new(2.5, -0.001)));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_coordinates("").is_empty());
        assert!(parse_coordinates("   \n\r ").is_empty());
        assert!(parse_coordinates("x,y a,b").is_empty());
    }
}
