//! Streaming `Placemark` extraction from KML 2.2 documents.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

use crate::{KML_NAMESPACE, KmlError};

/// The parts of a KML `Placemark` the registry needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placemark {
    /// Text of the first direct `name` child, untrimmed. `None` when the
    /// placemark has no `name` child.
    pub name: Option<String>,
    /// Trimmed text of the first `coordinates` element anywhere below the
    /// placemark. `None` when there is none.
    pub coordinates: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Name,
    Coordinates,
}

/// Text being collected for an open `name` or `coordinates` element.
struct Capture {
    depth: usize,
    target: Target,
    /// Indices into the output of the placemarks receiving this text.
    owners: Vec<usize>,
    text: String,
}

#[derive(Default)]
struct PlacemarkCollector {
    placemarks: Vec<Placemark>,
    /// Open placemarks as `(output index, element depth)`, innermost last.
    open: Vec<(usize, usize)>,
    capture: Option<Capture>,
}

impl PlacemarkCollector {
    fn start(&mut self, local: &[u8], depth: usize) {
        if self.capture.is_some() {
            return;
        }

        match local {
            b"Placemark" => {
                self.open.push((self.placemarks.len(), depth));
                self.placemarks.push(Placemark::default());
            }
            b"name" => {
                let Some(&(idx, placemark_depth)) = self.open.last() else {
                    return;
                };
                if placemark_depth + 1 == depth && self.placemarks[idx].name.is_none() {
                    self.begin_capture(depth, Target::Name, vec![idx]);
                }
            }
            b"coordinates" => {
                let owners: Vec<usize> = self
                    .open
                    .iter()
                    .map(|&(idx, _)| idx)
                    .filter(|&idx| self.placemarks[idx].coordinates.is_none())
                    .collect();
                if !owners.is_empty() {
                    self.begin_capture(depth, Target::Coordinates, owners);
                }
            }
            _ => {}
        }
    }

    fn begin_capture(&mut self, depth: usize, target: Target, owners: Vec<usize>) {
        self.capture = Some(Capture {
            depth,
            target,
            owners,
            text: String::new(),
        });
    }

    fn text(&mut self, text: &str) {
        if let Some(capture) = &mut self.capture {
            capture.text.push_str(text);
        }
    }

    /// Closes whichever capture or placemark is open at `depth`.
    fn end(&mut self, depth: usize) {
        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let Some(capture) = self.capture.take() {
                self.finish_capture(capture);
            }
        }

        if self.open.last().is_some_and(|&(_, d)| d == depth) {
            self.open.pop();
        }
    }

    fn finish_capture(&mut self, capture: Capture) {
        let value = match capture.target {
            Target::Name => capture.text,
            Target::Coordinates => capture.text.trim().to_string(),
        };

        for idx in capture.owners {
            let placemark = &mut self.placemarks[idx];
            let slot = match capture.target {
                Target::Name => &mut placemark.name,
                Target::Coordinates => &mut placemark.coordinates,
            };
            if slot.is_none() {
                *slot = Some(value.clone());
            }
        }
    }
}

fn is_kml(ns: &ResolveResult<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == KML_NAMESPACE.as_bytes())
}

fn check_root(ns: &ResolveResult<'_>, e: &BytesStart<'_>) -> Result<(), KmlError> {
    let local = e.local_name();
    if is_kml(ns) && local.as_ref() == b"kml" {
        Ok(())
    } else {
        Err(KmlError::UnexpectedRoot {
            name: String::from_utf8_lossy(local.as_ref()).into_owned(),
        })
    }
}

/// Reads every KML `Placemark` in `document`, in document order.
///
/// Placemarks nested in `Document` or `Folder` elements are included.
/// Elements outside the KML 2.2 namespace are ignored.
///
/// # Errors
///
/// * [`KmlError::Xml`] if the XML is malformed
/// * [`KmlError::MissingRoot`] if there is no root element
/// * [`KmlError::UnexpectedRoot`] if the root is not a KML 2.2 `kml` element
/// * [`KmlError::Truncated`] if input ends with elements still open
pub fn read_placemarks(document: &str) -> Result<Vec<Placemark>, KmlError> {
    let mut reader = NsReader::from_str(document);
    let mut collector = PlacemarkCollector::default();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let (ns, event) = reader.read_resolved_event()?;

        match event {
            Event::Start(e) => {
                depth += 1;
                if !seen_root {
                    check_root(&ns, &e)?;
                    seen_root = true;
                }
                if is_kml(&ns) {
                    collector.start(e.local_name().as_ref(), depth);
                }
            }
            Event::Empty(e) => {
                if !seen_root {
                    check_root(&ns, &e)?;
                    seen_root = true;
                }
                if is_kml(&ns) {
                    collector.start(e.local_name().as_ref(), depth + 1);
                    collector.end(depth + 1);
                }
            }
            Event::End(_) => {
                collector.end(depth);
                depth = depth.saturating_sub(1);
            }
            Event::Text(e) => collector.text(&e.unescape()?),
            Event::CData(e) => collector.text(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(KmlError::MissingRoot);
    }
    if depth > 0 {
        return Err(KmlError::Truncated { open: depth });
    }

    Ok(collector.placemarks)
}
