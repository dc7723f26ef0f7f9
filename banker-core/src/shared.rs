//! Banqueiro compartilhado entre threads
//!
//! Um único lock por instância: o estado especulativo do passo 3 de
//! `request_resources` nunca é observável por outra thread.

use std::sync::{Arc, Mutex};
use crate::error::BankerResult;
use crate::matrix::Units;
use crate::safety::{SafeSequence, SafetyTrace};
use crate::snapshot::Snapshot;
use crate::state::{Banker, RequestOutcome};

/// Handle clonável para um mesmo banqueiro
#[derive(Debug, Clone)]
pub struct SharedBanker {
    inner: Arc<Mutex<Banker>>,
}

impl SharedBanker {
    /// Envolve um banqueiro
    pub fn new(banker: Banker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(banker)),
        }
    }

    /// Algoritmo de segurança sob o lock
    pub fn is_safe(&self) -> BankerResult<(bool, SafeSequence)> {
        let banker = self.inner.lock()?;
        Ok(banker.is_safe())
    }

    /// Simulação completa sob o lock
    pub fn safety_trace(&self) -> BankerResult<SafetyTrace> {
        let banker = self.inner.lock()?;
        Ok(banker.safety_trace())
    }

    /// Pedido atômico (passos 1-4 sob o mesmo lock)
    pub fn request_resources(
        &self,
        process_id: usize,
        request: &[Units],
    ) -> BankerResult<RequestOutcome> {
        let mut banker = self.inner.lock()?;
        banker.request_resources(process_id, request)
    }

    /// Cópia consistente das matrizes
    pub fn snapshot(&self) -> BankerResult<Snapshot> {
        let banker = self.inner.lock()?;
        Ok(banker.snapshot())
    }

    /// Executa `f` com acesso exclusivo de leitura
    pub fn with<R>(&self, f: impl FnOnce(&Banker) -> R) -> BankerResult<R> {
        let banker = self.inner.lock()?;
        Ok(f(&banker))
    }
}

impl From<Banker> for SharedBanker {
    fn from(banker: Banker) -> Self {
        Self::new(banker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BankerError;

    fn small() -> Banker {
        Banker::new(2, 1, &[2], &[vec![3], vec![3]], &[vec![1], vec![0]]).unwrap()
    }

    #[test]
    fn test_clone_shares_engine() {
        let shared = SharedBanker::new(small());
        let other = shared.clone();

        let outcome = shared.request_resources(0, &[1]).unwrap();
        assert!(outcome.is_granted());
        assert_eq!(other.snapshot().unwrap().available, vec![1]);
    }

    #[test]
    fn test_poisoned_lock_is_error() {
        let shared = SharedBanker::new(small());
        let poisoner = shared.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison");
        })
        .join();

        let err = shared.is_safe().unwrap_err();
        assert!(matches!(err, BankerError::LockPoisoned(_)));
    }
}
