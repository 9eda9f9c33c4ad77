//! Signed wire requests.
//!
//! JSON callers send plain integers, which may be negative. These forms are
//! converted into the typed API with `TryFrom`, so a negative balance or bet
//! is rejected before it can reach the ledger.

use serde::{Deserialize, Serialize};

use crate::{Address, Chips, Result, RoundInput, ShowdownError, amount::from_signed};

/// `initialize(balances, addresses)` as received on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeRequest {
    pub balances: Vec<i128>,
    pub addresses: Vec<String>,
}

/// Validated registration: balances and addresses of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub balances: Vec<Chips>,
    pub addresses: Vec<Address>,
}

impl TryFrom<InitializeRequest> for Registration {
    type Error = ShowdownError;

    fn try_from(request: InitializeRequest) -> Result<Self> {
        let balances = request
            .balances
            .iter()
            .enumerate()
            .map(|(index, raw)| from_signed(*raw).ok_or(ShowdownError::InvalidBalance { index }))
            .collect::<Result<Vec<_>>>()?;
        if request.addresses.len() != balances.len() {
            return Err(ShowdownError::LengthMismatch {
                field: "addresses",
                expected: balances.len(),
                actual: request.addresses.len(),
            });
        }
        let addresses = request
            .addresses
            .iter()
            .map(|raw| raw.parse())
            .collect::<Result<Vec<Address>>>()?;
        Ok(Self {
            balances,
            addresses,
        })
    }
}

/// `settleRound(hands, board, bets)` as received on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleRoundRequest {
    pub hands: Vec<String>,
    #[serde(default)]
    pub board: Option<String>,
    pub bets: Vec<i128>,
}

impl TryFrom<SettleRoundRequest> for RoundInput {
    type Error = ShowdownError;

    fn try_from(request: SettleRoundRequest) -> Result<Self> {
        let bets = request
            .bets
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                from_signed(*raw).ok_or_else(|| ShowdownError::InvalidBet {
                    reason: format!("bet for participant {index} cannot be negative ({raw})"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RoundInput::new(
            request.hands,
            request.board.unwrap_or_default(),
            bets,
        ))
    }
}
