//! Algoritmo de segurança (simulação de término)
//!
//! A simulação trabalha sobre cópias locais (`work`, `finish`) e nunca
//! altera as matrizes do banqueiro.

use std::fmt;
use std::ops::Deref;
use serde::{Deserialize, Serialize};
use crate::matrix::{fits, Matrix, Units};

/// Ordem de varredura dos processos durante a simulação
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOrder {
    /// Recomeça do processo 0 após cada término simulado
    #[default]
    Restart,
    /// Continua no próximo índice; nova passada só no fim da faixa
    Sweep,
}

impl ScanOrder {
    /// Nome curto (mesmo usado em TOML)
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanOrder::Restart => "restart",
            ScanOrder::Sweep => "sweep",
        }
    }
}

impl fmt::Display for ScanOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScanOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "restart" => Ok(ScanOrder::Restart),
            "sweep" => Ok(ScanOrder::Sweep),
            other => Err(format!("unknown scan order '{other}' (expected restart or sweep)")),
        }
    }
}

/// Sequência segura: ordem de término dos processos
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SafeSequence(Vec<usize>);

impl SafeSequence {
    /// Sequência a partir de índices
    pub fn new(order: Vec<usize>) -> Self {
        Self(order)
    }

    /// Índices como `Vec`
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for SafeSequence {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for SafeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<empty>");
        }
        for (pos, process) in self.0.iter().enumerate() {
            if pos > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "P{process}")?;
        }
        Ok(())
    }
}

/// Um término simulado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyStep {
    /// Processo que terminou
    pub process: usize,
    /// `work` antes de liberar a alocação do processo
    pub work_before: Vec<Units>,
    /// `work` depois de liberar
    pub work_after: Vec<Units>,
}

/// Transcrição completa de uma simulação
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyTrace {
    /// Estado seguro?
    pub safe: bool,
    /// Sequência encontrada (vazia se inseguro)
    pub sequence: SafeSequence,
    /// Passos (vazio se inseguro)
    pub steps: Vec<SafetyStep>,
}

impl SafetyTrace {
    /// `(is_safe, sequence)`
    pub fn into_result(self) -> (bool, SafeSequence) {
        (self.safe, self.sequence)
    }

    fn unsafe_state() -> Self {
        Self {
            safe: false,
            sequence: SafeSequence::default(),
            steps: Vec::new(),
        }
    }
}

/// Simula o término de todos os processos
///
/// Um processo `i` pode terminar quando `need[i] <= work`; ao terminar,
/// devolve `allocation[i]` a `work`. Entre candidatos simultâneos o menor
/// índice vence. Termina em no máximo P passadas: uma passada sem término
/// novo reporta estado inseguro.
///
/// O chamador garante que `available[j] + Σ allocation[i][j]` cabe em
/// `Units`, então `work` nunca transborda.
pub fn simulate(
    available: &[Units],
    allocation: &Matrix,
    need: &Matrix,
    order: ScanOrder,
) -> SafetyTrace {
    let process_count = need.rows();
    let mut work = available.to_vec();
    let mut finish = vec![false; process_count];
    let mut sequence = Vec::with_capacity(process_count);
    let mut steps = Vec::with_capacity(process_count);

    while sequence.len() < process_count {
        let mut progressed = false;

        for i in 0..process_count {
            if finish[i] || !fits(need.row(i), &work) {
                continue;
            }

            let work_before = work.clone();
            for (w, held) in work.iter_mut().zip(allocation.row(i)) {
                *w += held;
            }
            finish[i] = true;
            sequence.push(i);
            steps.push(SafetyStep {
                process: i,
                work_before,
                work_after: work.clone(),
            });
            progressed = true;

            if order == ScanOrder::Restart {
                break;
            }
        }

        if !progressed {
            return SafetyTrace::unsafe_state();
        }
    }

    SafetyTrace {
        safe: true,
        sequence: SafeSequence::new(sequence),
        steps,
    }
}

/// Re-simula uma ordem fornecida pelo chamador
///
/// Verdadeiro se a ordem cita cada processo exatamente uma vez e cada
/// passo satisfaz `need <= work`.
pub fn replay(available: &[Units], allocation: &Matrix, need: &Matrix, sequence: &[usize]) -> bool {
    let process_count = need.rows();
    if sequence.len() != process_count {
        return false;
    }

    let mut work = available.to_vec();
    let mut finish = vec![false; process_count];

    for &i in sequence {
        if i >= process_count || finish[i] || !fits(need.row(i), &work) {
            return false;
        }
        for (w, held) in work.iter_mut().zip(allocation.row(i)) {
            *w += held;
        }
        finish[i] = true;
    }

    true
}
