//! Optional-header resolution.

use crate::model::{OptionalHeaderVariant, ResolvedHeader};
use crate::services::InspectError;

/// Resolve a bit-width-polymorphic optional header into its common field set.
///
/// Dispatch is a static match on the variant tag; the tag was fixed at
/// image-parse time and the set of valid variants is closed. An
/// [`OptionalHeaderVariant::Unrecognized`] header fails with
/// [`InspectError::UnsupportedHeaderVariant`] and yields no partial fields.
pub fn resolve(header: &OptionalHeaderVariant) -> Result<ResolvedHeader, InspectError> {
    match *header {
        OptionalHeaderVariant::Pe32 { entry_point, base_of_code, image_base } => {
            Ok(ResolvedHeader::Bits32 { entry_point, base_of_code, image_base })
        }
        OptionalHeaderVariant::Pe32Plus { entry_point, base_of_code, image_base } => {
            Ok(ResolvedHeader::Bits64 { entry_point, base_of_code, image_base })
        }
        OptionalHeaderVariant::Unrecognized { magic } => {
            Err(InspectError::UnsupportedHeaderVariant { magic })
        }
    }
}
