//! Domain models for the gateway adapter.

pub mod address;
pub mod card;
pub mod envelope;
pub mod line_item;
pub mod metadata;
pub mod money;
pub mod payment;
pub mod transaction;

pub use address::NameAddress;
pub use card::Card;
pub use envelope::{CreateTransactionRequest, MerchantAuthentication};
pub use line_item::{LineItem, LineItems};
pub use metadata::{CardholderAuthentication, Customer, DeviceType, MarketType, Order, Retail};
pub use money::{Currency, Money};
pub use payment::{CreditCard, Payment};
pub use transaction::{Transaction, TransactionType};
