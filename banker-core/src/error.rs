//! Tipos de erro para banker-core

use crate::matrix::Units;
use thiserror::Error;

/// Resultado customizado para operações do banqueiro
pub type BankerResult<T> = Result<T, BankerError>;

/// Violação estrutural detectada na construção do estado
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateViolation {
    /// Vetor de disponíveis com tamanho errado
    #[error("available has {found} entries, expected {expected}")]
    AvailableLength { expected: usize, found: usize },

    /// Matriz com número de linhas errado
    #[error("{matrix} has {found} rows, expected {expected}")]
    RowCount {
        matrix: &'static str,
        expected: usize,
        found: usize,
    },

    /// Linha de matriz com número de colunas errado
    #[error("{matrix} row P{process} has {found} entries, expected {expected}")]
    RowLength {
        matrix: &'static str,
        process: usize,
        expected: usize,
        found: usize,
    },

    /// Alocação acima do máximo declarado
    #[error("allocation[{process}][{resource}] = {allocated} exceeds maximum {maximum}")]
    AllocationExceedsMaximum {
        process: usize,
        resource: usize,
        allocated: Units,
        maximum: Units,
    },

    /// Total de um tipo de recurso não cabe em `Units`
    #[error("total units of resource R{resource} overflow")]
    ResourceOverflow { resource: usize },
}

/// Erros que podem ocorrer em operações do banqueiro
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankerError {
    #[error("Invalid state: {0}")]
    InvalidState(#[from] StateViolation),

    #[error(
        "Process P{process} exceeded its maximum claim: requested {requested} of R{resource}, remaining need {need}"
    )]
    ExceedsMaximumClaim {
        process: usize,
        resource: usize,
        requested: Units,
        need: Units,
    },

    #[error(
        "Resources not available, P{process} must wait: requested {requested} of R{resource}, available {available}"
    )]
    InsufficientResources {
        process: usize,
        resource: usize,
        requested: Units,
        available: Units,
    },

    #[error("Unknown process P{process} (process count: {process_count})")]
    UnknownProcess { process: usize, process_count: usize },

    #[error("Request has {found} entries, expected {expected}")]
    RequestLength { expected: usize, found: usize },

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BankerError {
    /// Condição de espera (o chamador pode tentar de novo mais tarde)
    pub fn is_wait(&self) -> bool {
        matches!(self, BankerError::InsufficientResources { .. })
    }
}

impl<T> From<std::sync::PoisonError<T>> for BankerError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        BankerError::LockPoisoned(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BankerError::ExceedsMaximumClaim {
            process: 4,
            resource: 0,
            requested: 5,
            need: 4,
        };
        assert!(err.to_string().contains("exceeded its maximum claim"));
        assert!(err.to_string().contains("P4"));
    }

    #[test]
    fn test_violation_conversion() {
        let violation = StateViolation::AllocationExceedsMaximum {
            process: 2,
            resource: 1,
            allocated: 3,
            maximum: 1,
        };
        let err: BankerError = violation.clone().into();
        assert_eq!(err, BankerError::InvalidState(violation));
        assert!(err.to_string().contains("allocation[2][1]"));
    }

    #[test]
    fn test_only_insufficient_is_wait() {
        let wait = BankerError::InsufficientResources {
            process: 0,
            resource: 0,
            requested: 2,
            available: 1,
        };
        assert!(wait.is_wait());
        assert!(!BankerError::Config("x".into()).is_wait());
    }
}
