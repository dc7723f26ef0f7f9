//! # 🏦 banker-core — Deadlock Avoidance
//!
//! Estado de alocação de recursos entre um conjunto fixo de processos e o
//! algoritmo do banqueiro: cada pedido é validado antecipadamente por uma
//! simulação de término, e só é concedido se o sistema continuar seguro.
//!
//! ## Computational Complexity
//!
//! **Safety check — O(P² · R):**
//! - No máximo P passadas, cada uma O(P · R)
//! - Opera sobre cópias locais (`work`, `finish`)
//!
//! **Request — O(P² · R):**
//! - Checagens de need/available: O(R)
//! - Checkpoint + rollback: O(P · R) (cópia das partes mutáveis)
//! - Safety check sobre o estado especulativo
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │         Banker                                  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  available | maximum | allocation | need  │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Safety Simulation (Restart | Sweep)      │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Request: claim → wait → apply → check    │  │
//! │  │           → commit | rollback             │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use banker_core::{Banker, RequestOutcome};
//!
//! let mut banker = Banker::new(
//!     2,
//!     1,
//!     &[2],
//!     &[vec![3], vec![3]],
//!     &[vec![1], vec![0]],
//! )?;
//!
//! let (safe, sequence) = banker.is_safe();
//! assert!(safe);
//! assert_eq!(&*sequence, &[0, 1]);
//!
//! match banker.request_resources(1, &[1])? {
//!     RequestOutcome::Granted(sequence) => println!("granted: {sequence}"),
//!     RequestOutcome::Denied(reason) => println!("denied: {reason:?}"),
//! }
//! # Ok::<(), banker_core::BankerError>(())
//! ```

pub mod config;
pub mod error;
pub mod matrix;
pub mod safety;
pub mod shared;
pub mod snapshot;
pub mod state;

pub use config::{BankerConfig, InitialState, Scenario, ScenarioRequest};
pub use error::{BankerError, BankerResult, StateViolation};
pub use matrix::{Matrix, Units};
pub use safety::{SafeSequence, SafetyStep, SafetyTrace, ScanOrder};
pub use shared::SharedBanker;
pub use snapshot::Snapshot;
pub use state::{Banker, DenialReason, RequestOutcome};
