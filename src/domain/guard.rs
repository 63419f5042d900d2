//! Pre-submission slippage policy.
//!
//! The guard is the last gate before an order is allowed to touch the
//! network: it runs after simulation and before build/sign/submit, so a
//! rejected order never costs a submission fee. Pure and stateless.

use rust_decimal::Decimal;
use tracing::debug;

use super::error::TradeError;
use super::fill::FillPlan;

/// Policy gate that vetoes plans whose slippage exceeds the tolerance.
///
/// Infeasible fills never reach the guard: simulation already returned
/// them as [`TradeError::InsufficientLiquidity`].
#[derive(Debug, Clone, Copy)]
pub struct SlippageGuard {
    max_slippage: Decimal,
}

impl SlippageGuard {
    /// A guard with the given tolerance.
    pub fn new(max_slippage: Decimal) -> Self {
        Self { max_slippage }
    }

    /// Accept or reject a fill plan.
    ///
    /// # Errors
    /// [`TradeError::SlippageExceeded`] with the observed value and the
    /// threshold it broke.
    pub fn evaluate(&self, plan: &FillPlan) -> Result<(), TradeError> {
        if plan.slippage > self.max_slippage {
            return Err(TradeError::SlippageExceeded {
                observed: plan.slippage,
                threshold: self.max_slippage,
            });
        }

        debug!(
            slippage = %plan.slippage,
            threshold = %self.max_slippage,
            execution_price = %plan.execution_price,
            "fill plan accepted"
        );
        Ok(())
    }
}
