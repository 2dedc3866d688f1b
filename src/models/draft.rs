use serde::{Deserialize, Serialize};

use crate::models::entry::Coordinates;

/// Transient capture state for one entry session: the QR payload and GPS
/// pair arrive from the capture widgets before the form is submitted.
/// Held in the server-side session, never in process globals, and cleared
/// after a successful submission so the next entry starts blank.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub qr_code: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl EntryDraft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.qr_code.is_none() && self.coordinates.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_both_fields() {
        let mut draft = EntryDraft {
            qr_code: Some("PLT-42".to_string()),
            coordinates: Some(Coordinates {
                latitude: 19.07,
                longitude: 72.87,
            }),
        };

        assert!(!draft.is_empty());
        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft, EntryDraft::default());
    }
}
