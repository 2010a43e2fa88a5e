// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Solana address shape check.

const MIN_ADDRESS_LEN: usize = 32;
const MAX_ADDRESS_LEN: usize = 44;

/// Returns `true` if `c` belongs to the base58 alphabet (no `0`, `O`, `I`, `l`).
fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

/// Check whether `address` is shaped like a base58 Solana public key.
///
/// This is a syntactic sanity check only. It never confirms the account
/// exists on-chain or holds a mint, so well-formed garbage passes and the
/// fetchers downstream must cope with it.
pub fn is_valid_solana_address(address: &str) -> bool {
    // Every accepted char is ASCII, so byte length equals char count here.
    (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&address.len())
        && address.chars().all(is_base58_char)
}
