#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! KML 2.2 placemark reader and coordinate string parser.
//!
//! [`read_placemarks`] streams a KML document with `quick-xml` and returns
//! each `Placemark`'s name and raw coordinate text in document order.
//! [`parse_coordinates`] turns that text into latitude-first points,
//! skipping malformed tuples instead of failing.

pub mod coordinates;
pub mod placemark;

pub use coordinates::{parse_coordinates, parse_tuple};
pub use placemark::{Placemark, read_placemarks};

use thiserror::Error;

/// XML namespace every element of a KML 2.2 document is bound to.
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Errors that make a KML document unusable as a whole.
#[derive(Debug, Error)]
pub enum KmlError {
    /// The XML itself is malformed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document contains no root element.
    #[error("Document has no root element")]
    MissingRoot,

    /// The root element is not a KML 2.2 `kml` element.
    #[error("Expected a <kml> root in namespace {}, found <{name}>", KML_NAMESPACE)]
    UnexpectedRoot {
        /// Local name of the root element that was found.
        name: String,
    },

    /// Input ended before every element was closed.
    #[error("Document ended with {open} unclosed element(s)")]
    Truncated {
        /// Number of elements still open at end of input.
        open: usize,
    },
}
