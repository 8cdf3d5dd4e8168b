//! Section catalog and raw section access.

use crate::image::PeImage;
use crate::model::Section;
use crate::services::InspectError;

/// Section names in on-disk table order.
///
/// Not sorted and not deduplicated: duplicate names are possible in real
/// images and both occurrences are listed.
pub fn list(image: &PeImage) -> Vec<&str> {
    image.sections.iter().map(|sec| sec.name.as_str()).collect()
}

/// Look up a section by exact name.
///
/// When duplicates exist the first in table order wins. Fails with
/// [`InspectError::SectionNotFound`] when no section matches.
pub fn find<'a>(image: &'a PeImage, name: &str) -> Result<&'a Section, InspectError> {
    image
        .sections
        .iter()
        .find(|sec| sec.name == name)
        .ok_or_else(|| InspectError::SectionNotFound(name.to_string()))
}

/// The exact, unmodified raw bytes of a named section.
///
/// The content is opaque binary data; nothing here claims it is text, and
/// any decoding attempt (and its potential information loss) belongs to the
/// caller. Lookup semantics match [`find`].
pub fn dump<'a>(image: &'a PeImage, name: &str) -> Result<&'a [u8], InspectError> {
    find(image, name).map(|sec| sec.data.as_slice())
}
