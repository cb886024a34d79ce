// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Error taxonomy for the query/analytics core. Validation problems are
/// rejected before any storage call; storage failures propagate as-is,
/// the core never retries.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),

    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
