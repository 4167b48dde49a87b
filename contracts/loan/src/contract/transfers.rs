use platform::{bank, batch::Batch};
use sdk::cosmwasm_std::Storage;

use crate::{
    state::{config::Config, transfer::Transfer},
    ContractResult,
};

/// No action pays out to more than this many destinations.
pub const MAX_TRANSFERS: usize = 3;

/// Schedules the payouts of one invocation, each tracked until its delivery
/// report comes back.  Zero amounts are skipped.
pub fn emit(
    storage: &mut dyn Storage,
    config: &Config,
    transfers: Vec<Transfer>,
) -> ContractResult<Batch> {
    debug_assert!(transfers.len() <= MAX_TRANSFERS);

    transfers
        .into_iter()
        .filter(|transfer| !transfer.amount.is_zero())
        .try_fold(Batch::default(), |batch, transfer| {
            let reply_id = transfer.schedule(storage)?;

            Ok(batch.schedule_reply_always(
                bank::send(
                    &transfer.destination,
                    transfer.slot,
                    transfer.amount,
                    &config.issuers,
                ),
                reply_id,
            ))
        })
}
