//! Case draft
//!
//! Form state of the case creation modal: the required case fields as the
//! operator typed them, plus the reward selection. Turning a draft into a
//! request is the only place the 100% invariant and the source-item
//! references are enforced.

use crate::cases::selection::RewardSelection;
use crate::error::AdminError;
use crate::models::entities::PartnerNft;
use crate::models::requests::{CaseRewardItem, CreateCaseRequest};

// == Case Draft ==
/// Editing state for a new case. Price is kept as the raw text the operator
/// typed; it is parsed only when building the request.
#[derive(Debug, Clone, Default)]
pub struct CaseDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub selection: RewardSelection,
}

impl CaseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    // == Submission Gate ==
    /// True when the form may be submitted: required fields present, price
    /// parseable, at least one reward selected, chances summing to 100%.
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
            && self.parsed_price().is_some()
            && !self.selection.is_empty()
            && self.selection.is_complete()
    }

    fn parsed_price(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
    }

    // == Request Building ==
    /// Resolves the selection against the source item list and produces the
    /// create-case request.
    ///
    /// Fails with a validation error when required fields are missing or the
    /// chance sum is off, and with a reference error when a selected
    /// identifier is no longer present in `source_items` (the listing page
    /// changed between selection and submission).
    pub fn build_request(&self, source_items: &[PartnerNft]) -> Result<CreateCaseRequest, AdminError> {
        if self.name.trim().is_empty() || self.selection.is_empty() {
            return Err(AdminError::Validation(
                "name, price and at least one reward are required".to_string(),
            ));
        }
        let price = self.parsed_price().ok_or_else(|| {
            AdminError::Validation("price must be a positive number".to_string())
        })?;
        if !self.selection.is_complete() {
            return Err(AdminError::Validation(format!(
                "drop chances must sum to 100%, currently {:.2}%",
                self.selection.total_chance()
            )));
        }

        let mut nft_items = Vec::with_capacity(self.selection.len());
        for (item_id, entry) in self.selection.iter() {
            let nft = source_items
                .iter()
                .find(|n| n.id == item_id)
                .ok_or_else(|| AdminError::Reference(item_id.to_string()))?;
            nft_items.push(CaseRewardItem {
                nft_id: nft.id.clone(),
                name: nft.name.clone(),
                image_url: nft.photo_url.clone(),
                rarity: entry.rarity,
                drop_chance: entry.drop_chance,
                estimated_price: nft
                    .floor_price
                    .as_deref()
                    .and_then(|p| p.parse::<f64>().ok()),
            });
        }

        Ok(CreateCaseRequest {
            name: self.name.trim().to_string(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            price,
            image_url: if self.image_url.is_empty() {
                None
            } else {
                Some(self.image_url.clone())
            },
            is_active: Some(true),
            is_locked: None,
            unlock_level: None,
            unlock_price: None,
            nft_items,
        })
    }
}
