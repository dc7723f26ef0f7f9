//! Configuração do banqueiro e cenários (banker.toml)
//!
//! Um cenário descreve o estado inicial e, opcionalmente, uma lista de
//! pedidos a reproduzir em ordem.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{BankerError, BankerResult};
use crate::matrix::Units;
use crate::safety::ScanOrder;
use crate::state::Banker;

/// Configuração do motor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankerConfig {
    /// Ordem de varredura da simulação de segurança
    #[serde(default)]
    pub scan_order: ScanOrder,
}

/// Estado inicial de um cenário
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialState {
    /// Unidades livres (R entradas)
    pub available: Vec<Units>,
    /// P linhas de R entradas
    pub maximum: Vec<Vec<Units>>,
    /// P linhas de R entradas
    pub allocation: Vec<Vec<Units>>,
}

/// Pedido a reproduzir
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    /// Processo solicitante
    pub process: usize,
    /// Unidades pedidas (R entradas)
    pub units: Vec<Units>,
}

/// Cenário completo (banker.toml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Configuração do motor
    #[serde(default)]
    pub engine: BankerConfig,

    /// Estado inicial
    pub state: InitialState,

    /// Pedidos, em ordem
    #[serde(default)]
    pub requests: Vec<ScenarioRequest>,
}

impl Scenario {
    /// Lê cenário de uma string TOML
    pub fn from_str(content: &str) -> BankerResult<Self> {
        toml::from_str(content)
            .map_err(|e| BankerError::Config(format!("Failed to parse scenario: {}", e)))
    }

    /// Lê cenário de um arquivo
    pub fn from_file(path: &Path) -> BankerResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BankerError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_str(&content)
    }

    /// Serializa como TOML
    pub fn to_toml(&self) -> BankerResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| BankerError::Config(format!("Failed to serialize scenario: {}", e)))
    }

    /// Instância clássica de livro-texto: 5 processos, 3 tipos (A, B, C)
    pub fn textbook() -> Self {
        Self {
            engine: BankerConfig::default(),
            state: InitialState {
                available: vec![3, 3, 2],
                maximum: vec![
                    vec![7, 5, 3],
                    vec![3, 2, 2],
                    vec![9, 0, 2],
                    vec![2, 2, 2],
                    vec![4, 3, 3],
                ],
                allocation: vec![
                    vec![0, 1, 0],
                    vec![2, 0, 0],
                    vec![3, 0, 2],
                    vec![2, 1, 1],
                    vec![0, 0, 2],
                ],
            },
            requests: vec![
                ScenarioRequest { process: 1, units: vec![1, 0, 2] },
                ScenarioRequest { process: 4, units: vec![3, 3, 0] },
                ScenarioRequest { process: 0, units: vec![0, 2, 0] },
            ],
        }
    }

    /// Número de processos (linhas de `maximum`)
    pub fn process_count(&self) -> usize {
        self.state.maximum.len()
    }

    /// Número de tipos de recurso (tamanho de `available`)
    pub fn resource_type_count(&self) -> usize {
        self.state.available.len()
    }

    /// Constrói o banqueiro para o estado inicial
    pub fn build(&self) -> BankerResult<Banker> {
        Banker::with_config(
            self.process_count(),
            self.resource_type_count(),
            &self.state.available,
            &self.state.maximum,
            &self.state.allocation,
            self.engine.clone(),
        )
    }
}
