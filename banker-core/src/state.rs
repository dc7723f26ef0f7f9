//! Motor de estado de alocação (banqueiro)

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::config::BankerConfig;
use crate::error::{BankerError, BankerResult, StateViolation};
use crate::matrix::{first_excess, Matrix, Units};
use crate::safety::{self, SafeSequence, SafetyTrace};
use crate::snapshot::{Checkpoint, Snapshot};

/// Motivo de negação de um pedido válido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// A concessão deixaria o sistema sem sequência segura
    UnsafeState,
}

/// Resultado de `request_resources`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestOutcome {
    /// Concedido; sequência segura do novo estado
    Granted(SafeSequence),
    /// Negado; estado inalterado
    Denied(DenialReason),
}

impl RequestOutcome {
    /// Foi concedido?
    pub fn is_granted(&self) -> bool {
        matches!(self, RequestOutcome::Granted(_))
    }
}

/// Estado de alocação: available, maximum, allocation e need
///
/// Invariantes mantidas por toda operação pública:
/// - `allocation[i][j] <= maximum[i][j]`
/// - `need[i][j] == maximum[i][j] - allocation[i][j]`
/// - `available[j] + Σ allocation[i][j] == totals[j]`
#[derive(Debug, Clone)]
pub struct Banker {
    available: Vec<Units>,
    maximum: Matrix,
    allocation: Matrix,
    need: Matrix,
    totals: Vec<Units>,
    config: BankerConfig,
}

impl Banker {
    /// Cria novo banqueiro com configuração padrão
    pub fn new(
        process_count: usize,
        resource_type_count: usize,
        available: &[Units],
        maximum: &[Vec<Units>],
        allocation: &[Vec<Units>],
    ) -> BankerResult<Self> {
        Self::with_config(
            process_count,
            resource_type_count,
            available,
            maximum,
            allocation,
            BankerConfig::default(),
        )
    }

    /// Cria com configuração customizada
    ///
    /// Copia as matrizes do chamador (nunca as referencia) e deriva `need`.
    pub fn with_config(
        process_count: usize,
        resource_type_count: usize,
        available: &[Units],
        maximum: &[Vec<Units>],
        allocation: &[Vec<Units>],
        config: BankerConfig,
    ) -> BankerResult<Self> {
        if available.len() != resource_type_count {
            return Err(StateViolation::AvailableLength {
                expected: resource_type_count,
                found: available.len(),
            }
            .into());
        }

        let maximum = Matrix::from_rows("maximum", maximum, process_count, resource_type_count)?;
        let allocation =
            Matrix::from_rows("allocation", allocation, process_count, resource_type_count)?;

        let mut need = Matrix::zeros(process_count, resource_type_count);
        for i in 0..process_count {
            for j in 0..resource_type_count {
                let (held, max) = (allocation.get(i, j), maximum.get(i, j));
                if held > max {
                    return Err(StateViolation::AllocationExceedsMaximum {
                        process: i,
                        resource: j,
                        allocated: held,
                        maximum: max,
                    }
                    .into());
                }
                need.row_mut(i)[j] = max - held;
            }
        }

        let mut totals = Vec::with_capacity(resource_type_count);
        for (j, &free) in available.iter().enumerate() {
            let total = u64::from(free) + allocation.column_sum(j);
            let total = Units::try_from(total)
                .map_err(|_| StateViolation::ResourceOverflow { resource: j })?;
            totals.push(total);
        }

        debug!(
            processes = process_count,
            resource_types = resource_type_count,
            ?totals,
            "banker state created"
        );

        Ok(Self {
            available: available.to_vec(),
            maximum,
            allocation,
            need,
            totals,
            config,
        })
    }

    /// Número de processos (P)
    pub fn process_count(&self) -> usize {
        self.maximum.rows()
    }

    /// Número de tipos de recurso (R)
    pub fn resource_type_count(&self) -> usize {
        self.available.len()
    }

    /// Unidades livres
    pub fn available(&self) -> &[Units] {
        &self.available
    }

    /// Matriz de máximos
    pub fn maximum(&self) -> &Matrix {
        &self.maximum
    }

    /// Matriz de alocação
    pub fn allocation(&self) -> &Matrix {
        &self.allocation
    }

    /// Matriz de necessidade
    pub fn need(&self) -> &Matrix {
        &self.need
    }

    /// Total constante de cada tipo
    pub fn totals(&self) -> &[Units] {
        &self.totals
    }

    /// Configuração
    pub fn config(&self) -> &BankerConfig {
        &self.config
    }

    /// Cópia completa para exibição
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            available: self.available.clone(),
            maximum: self.maximum.to_rows(),
            allocation: self.allocation.to_rows(),
            need: self.need.to_rows(),
            totals: self.totals.clone(),
        }
    }

    /// Verifica conservação e `need = maximum - allocation`
    pub fn is_conserved(&self) -> bool {
        let conserved = (0..self.resource_type_count()).all(|j| {
            u64::from(self.available[j]) + self.allocation.column_sum(j)
                == u64::from(self.totals[j])
        });

        conserved
            && (0..self.process_count()).all(|i| {
                (0..self.resource_type_count()).all(|j| {
                    let (max, held) = (self.maximum.get(i, j), self.allocation.get(i, j));
                    held <= max && self.need.get(i, j) == max - held
                })
            })
    }

    /// Algoritmo de segurança sobre o estado atual
    ///
    /// Sem efeitos colaterais; a sequência é vazia quando inseguro.
    pub fn is_safe(&self) -> (bool, SafeSequence) {
        self.safety_trace().into_result()
    }

    /// Simulação completa, com `work` a cada passo
    pub fn safety_trace(&self) -> SafetyTrace {
        let trace = safety::simulate(
            &self.available,
            &self.allocation,
            &self.need,
            self.config.scan_order,
        );
        debug!(safe = trace.safe, sequence = %trace.sequence, "safety check");
        trace
    }

    /// Re-simula uma ordem de término fornecida
    pub fn verify_sequence(&self, sequence: &[usize]) -> bool {
        safety::replay(&self.available, &self.allocation, &self.need, sequence)
    }

    /// Pedido de recursos: valida, aplica especulativamente, verifica
    /// segurança e confirma ou desfaz
    ///
    /// Pedidos recusados (erro ou `Denied`) deixam o estado idêntico ao
    /// anterior à chamada.
    pub fn request_resources(
        &mut self,
        process_id: usize,
        request: &[Units],
    ) -> BankerResult<RequestOutcome> {
        if process_id >= self.process_count() {
            return Err(BankerError::UnknownProcess {
                process: process_id,
                process_count: self.process_count(),
            });
        }
        if request.len() != self.resource_type_count() {
            return Err(BankerError::RequestLength {
                expected: self.resource_type_count(),
                found: request.len(),
            });
        }

        // 1. request <= need
        if let Some(j) = first_excess(request, self.need.row(process_id)) {
            debug!(process = process_id, ?request, resource = j, "request exceeds maximum claim");
            return Err(BankerError::ExceedsMaximumClaim {
                process: process_id,
                resource: j,
                requested: request[j],
                need: self.need.get(process_id, j),
            });
        }

        // 2. request <= available
        if let Some(j) = first_excess(request, &self.available) {
            debug!(process = process_id, ?request, resource = j, "request must wait");
            return Err(BankerError::InsufficientResources {
                process: process_id,
                resource: j,
                requested: request[j],
                available: self.available[j],
            });
        }

        // 3. Aplicação especulativa
        let checkpoint = Checkpoint::capture(&self.available, &self.allocation, &self.need);
        self.apply(process_id, request);

        // 4. Confirma ou desfaz
        let (safe, sequence) = self.is_safe();
        if safe {
            info!(process = process_id, ?request, %sequence, "request granted");
            Ok(RequestOutcome::Granted(sequence))
        } else {
            checkpoint.restore(&mut self.available, &mut self.allocation, &mut self.need);
            warn!(process = process_id, ?request, "request denied: unsafe state");
            Ok(RequestOutcome::Denied(DenialReason::UnsafeState))
        }
    }

    /// Move `request` de available para allocation do processo
    ///
    /// Só chamado após as checagens de need e available.
    fn apply(&mut self, process_id: usize, request: &[Units]) {
        let allocation = self.allocation.row_mut(process_id);
        for (j, &units) in request.iter().enumerate() {
            self.available[j] -= units;
            allocation[j] += units;
        }
        let need = self.need.row_mut(process_id);
        for (j, &units) in request.iter().enumerate() {
            need[j] -= units;
        }
        debug_assert!(self.is_conserved());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_resource(available: Units, maximum: &[Units], allocation: &[Units]) -> Banker {
        let max: Vec<Vec<Units>> = maximum.iter().map(|&m| vec![m]).collect();
        let alloc: Vec<Vec<Units>> = allocation.iter().map(|&a| vec![a]).collect();
        Banker::new(max.len(), 1, &[available], &max, &alloc).unwrap()
    }

    #[test]
    fn test_need_is_derived() {
        let banker = single_resource(2, &[5, 3], &[1, 3]);
        assert_eq!(banker.need().row(0), &[4]);
        assert_eq!(banker.need().row(1), &[0]);
        assert_eq!(banker.totals(), &[6]);
        assert!(banker.is_conserved());
    }

    #[test]
    fn test_allocation_above_maximum_rejected() {
        let err = Banker::new(2, 2, &[1, 1], &[vec![1, 1], vec![2, 2]], &[vec![1, 1], vec![2, 3]])
            .unwrap_err();
        assert_eq!(
            err,
            BankerError::InvalidState(StateViolation::AllocationExceedsMaximum {
                process: 1,
                resource: 1,
                allocated: 3,
                maximum: 2,
            })
        );
    }

    #[test]
    fn test_available_length_checked_first() {
        let err = Banker::new(1, 2, &[1], &[vec![1]], &[vec![1]]).unwrap_err();
        assert_eq!(
            err,
            BankerError::InvalidState(StateViolation::AvailableLength { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_total_overflow_rejected() {
        let err = Banker::new(1, 1, &[Units::MAX], &[vec![1]], &[vec![1]]).unwrap_err();
        assert_eq!(
            err,
            BankerError::InvalidState(StateViolation::ResourceOverflow { resource: 0 })
        );
    }

    #[test]
    fn test_apply_moves_units() {
        let mut banker = single_resource(3, &[4], &[1]);
        let outcome = banker.request_resources(0, &[2]).unwrap();
        assert!(outcome.is_granted());
        assert_eq!(banker.available(), &[1]);
        assert_eq!(banker.allocation().row(0), &[3]);
        assert_eq!(banker.need().row(0), &[1]);
    }

    #[test]
    fn test_unsafe_request_rolled_back() {
        // Seguro via P0 -> P1; uma unidade a P1 deixa ninguém apto
        let mut banker = single_resource(2, &[3, 3], &[1, 0]);
        assert!(banker.is_safe().0);
        let before = banker.snapshot();

        let outcome = banker.request_resources(1, &[1]).unwrap();
        assert_eq!(outcome, RequestOutcome::Denied(DenialReason::UnsafeState));
        assert_eq!(banker.snapshot(), before);
    }

    #[test]
    fn test_unknown_process() {
        let mut banker = single_resource(1, &[1], &[0]);
        let err = banker.request_resources(3, &[1]).unwrap_err();
        assert_eq!(err, BankerError::UnknownProcess { process: 3, process_count: 1 });
    }

    #[test]
    fn test_request_length() {
        let mut banker = single_resource(1, &[1], &[0]);
        let err = banker.request_resources(0, &[1, 0]).unwrap_err();
        assert_eq!(err, BankerError::RequestLength { expected: 1, found: 2 });
    }
}
