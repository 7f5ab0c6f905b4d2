//! Reserve CLI commands
//!
//! Reserves earmark part of the gross balance so it no longer counts as
//! available.

use clap::Subcommand;

use super::parse_non_negative_amount;
use crate::config::Settings;
use crate::display::{format_reserve_table, money};
use crate::error::{FinanceError, FinanceResult};
use crate::ledger::LedgerStore;
use crate::models::Money;
use crate::storage::BlobStore;

/// Reserve subcommands
#[derive(Subcommand)]
pub enum ReserveCommands {
    /// List reserves
    List,

    /// Set money aside
    Add {
        /// What the money is reserved for
        description: String,

        /// Amount reserved
        value: String,
    },

    /// Change a reserve's description or value
    Edit {
        /// Reserve ID (or unique prefix)
        id: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        value: Option<String>,
    },

    /// Release a reserve
    Remove {
        /// Reserve ID (or unique prefix)
        id: String,
    },
}

/// Handle a reserve command
pub fn handle_reserve_command<S: BlobStore>(
    store: &mut LedgerStore<S>,
    settings: &Settings,
    cmd: ReserveCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReserveCommands::List => {
            println!("{}", format_reserve_table(store.reserves(), symbol));
            if !store.reserves().is_empty() {
                let total: Money = store.reserves().iter().map(|r| r.value).sum();
                println!("Total reserved: {}", money(total, symbol));
            }
        }

        ReserveCommands::Add { description, value } => {
            if description.trim().is_empty() {
                return Err(FinanceError::Validation("Description cannot be empty".into()));
            }
            let reserve = store.add_reserve(description.trim(), parse_non_negative_amount(&value)?)?;
            println!(
                "Reserved {} for {} [{}]",
                money(reserve.value, symbol),
                reserve.description,
                reserve.id.short()
            );
        }

        ReserveCommands::Edit {
            id,
            description,
            value,
        } => {
            let value = value.as_deref().map(parse_non_negative_amount).transpose()?;
            let current = store.resolve_reserve(&id)?;
            let reserve_id = current.id.clone();
            let description = description.unwrap_or_else(|| current.description.clone());
            let value = value.unwrap_or(current.value);

            store.update_reserve(&reserve_id, description, value)?;
            println!("Updated reserve [{}]", reserve_id.short());
        }

        ReserveCommands::Remove { id } => {
            let reserve = store.resolve_reserve(&id)?;
            let (reserve_id, description) = (reserve.id.clone(), reserve.description.clone());
            store.remove_reserve(&reserve_id)?;
            println!("Released reserve: {} [{}]", description, reserve_id.short());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BlobKey, MemoryStore};

    #[test]
    fn test_add_then_edit_value_only() {
        let mut store =
            LedgerStore::open(MemoryStore::new().with_blob(BlobKey::BALANCES, "[]")).unwrap();
        let settings = Settings::default();

        handle_reserve_command(
            &mut store,
            &settings,
            ReserveCommands::Add {
                description: "Emergency".into(),
                value: "300".into(),
            },
        )
        .unwrap();

        let id = store.reserves()[0].id.as_str().to_string();
        handle_reserve_command(
            &mut store,
            &settings,
            ReserveCommands::Edit {
                id,
                description: None,
                value: Some("450".into()),
            },
        )
        .unwrap();

        let reserve = &store.reserves()[0];
        assert_eq!(reserve.description, "Emergency");
        assert_eq!(reserve.value, Money::from_units(450));
    }

    #[test]
    fn test_negative_reserve_rejected() {
        let mut store =
            LedgerStore::open(MemoryStore::new().with_blob(BlobKey::BALANCES, "[]")).unwrap();
        let err = handle_reserve_command(
            &mut store,
            &Settings::default(),
            ReserveCommands::Add {
                description: "Trip".into(),
                value: "-1".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
