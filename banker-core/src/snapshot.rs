//! Snapshots do estado e checkpoint de rollback

use serde::{Deserialize, Serialize};
use crate::error::{BankerError, BankerResult};
use crate::matrix::{Matrix, Units};

/// Cópia completa (owned) das quatro matrizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unidades livres por tipo
    pub available: Vec<Units>,
    /// Demanda máxima declarada
    pub maximum: Vec<Vec<Units>>,
    /// Unidades em posse de cada processo
    pub allocation: Vec<Vec<Units>>,
    /// Demanda restante (maximum - allocation)
    pub need: Vec<Vec<Units>>,
    /// Total constante por tipo (available + Σ allocation)
    pub totals: Vec<Units>,
}

impl Snapshot {
    /// Serializa como JSON
    pub fn to_json(&self) -> BankerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BankerError::Config(e.to_string()))
    }
}

/// Partes mutáveis salvas antes de uma concessão especulativa
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    available: Vec<Units>,
    allocation: Matrix,
    need: Matrix,
}

impl Checkpoint {
    /// Captura as partes mutáveis
    pub(crate) fn capture(available: &[Units], allocation: &Matrix, need: &Matrix) -> Self {
        Self {
            available: available.to_vec(),
            allocation: allocation.clone(),
            need: need.clone(),
        }
    }

    /// Restaura exatamente o estado capturado
    pub(crate) fn restore(
        self,
        available: &mut Vec<Units>,
        allocation: &mut Matrix,
        need: &mut Matrix,
    ) {
        *available = self.available;
        *allocation = self.allocation;
        *need = self.need;
    }
}
