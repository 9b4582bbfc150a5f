/*!
 * Status filter resolution for PO export.
 *
 * Raw `--types` tokens are resolved into a [`StatusFilter`] before any store
 * access. Resolution is fail-closed: one unmappable token rejects the whole
 * request, valid tokens notwithstanding.
 */

use crate::errors::ExportError;
use crate::store::models::TranslationStatus;

/// The set of translation statuses an export includes.
///
/// Semantically a set; token order and repetition are irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter {
    not_translated: bool,
    customized: bool,
    not_customized: bool,
}

impl StatusFilter {
    /// Filter that includes all three statuses (export everything)
    pub fn all() -> Self {
        Self {
            not_translated: true,
            customized: true,
            not_customized: true,
        }
    }

    /// Resolve raw status tokens into a filter.
    ///
    /// An empty token list selects all three statuses. Any token that maps
    /// to none of the canonical statuses fails the whole resolution with
    /// [`ExportError::InvalidFilter`]; no partial result is returned.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ExportError> {
        if tokens.is_empty() {
            return Ok(Self::all());
        }

        let mut filter = Self {
            not_translated: false,
            customized: false,
            not_customized: false,
        };

        for token in tokens {
            let status: TranslationStatus =
                token
                    .as_ref()
                    .parse()
                    .map_err(|_| ExportError::InvalidFilter {
                        token: token.as_ref().to_string(),
                    })?;
            match status {
                TranslationStatus::NotTranslated => filter.not_translated = true,
                TranslationStatus::Customized => filter.customized = true,
                TranslationStatus::NotCustomized => filter.not_customized = true,
            }
        }

        Ok(filter)
    }

    /// Whether the given status is included
    pub fn includes(&self, status: TranslationStatus) -> bool {
        match status {
            TranslationStatus::NotTranslated => self.not_translated,
            TranslationStatus::Customized => self.customized,
            TranslationStatus::NotCustomized => self.not_customized,
        }
    }

    /// Whether all three statuses are included
    pub fn is_all(&self) -> bool {
        self.not_translated && self.customized && self.not_customized
    }
}
