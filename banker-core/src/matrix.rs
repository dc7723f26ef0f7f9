//! Matrizes densas P×R (row-major)

use serde::{Deserialize, Serialize};
use crate::error::StateViolation;

/// Unidades de um tipo de recurso
pub type Units = u32;

/// Matriz densa de unidades, uma linha por processo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Units>,
}

impl Matrix {
    /// Matriz zerada
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Copia linhas do chamador, validando a forma
    ///
    /// Reporta a primeira divergência encontrada: primeiro o número de
    /// linhas, depois o tamanho de cada linha em ordem.
    pub fn from_rows(
        name: &'static str,
        rows: &[Vec<Units>],
        expected_rows: usize,
        expected_cols: usize,
    ) -> Result<Self, StateViolation> {
        if rows.len() != expected_rows {
            return Err(StateViolation::RowCount {
                matrix: name,
                expected: expected_rows,
                found: rows.len(),
            });
        }

        let mut data = Vec::with_capacity(expected_rows * expected_cols);
        for (process, row) in rows.iter().enumerate() {
            if row.len() != expected_cols {
                return Err(StateViolation::RowLength {
                    matrix: name,
                    process,
                    expected: expected_cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: expected_rows,
            cols: expected_cols,
            data,
        })
    }

    /// Número de linhas (processos)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Número de colunas (tipos de recurso)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Linha `i`
    pub fn row(&self, i: usize) -> &[Units] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Linha `i` mutável
    pub fn row_mut(&mut self, i: usize) -> &mut [Units] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Elemento (i, j)
    pub fn get(&self, i: usize, j: usize) -> Units {
        self.data[i * self.cols + j]
    }

    /// Itera sobre as linhas
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Units]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Soma da coluna `j` (sem overflow)
    pub fn column_sum(&self, j: usize) -> u64 {
        self.iter_rows().map(|row| u64::from(row[j])).sum()
    }

    /// Cópia em `Vec<Vec<_>>` para a camada de apresentação
    pub fn to_rows(&self) -> Vec<Vec<Units>> {
        self.iter_rows().map(<[Units]>::to_vec).collect()
    }
}

/// `lhs[j] <= rhs[j]` para todo j
pub fn fits(lhs: &[Units], rhs: &[Units]) -> bool {
    first_excess(lhs, rhs).is_none()
}

/// Primeiro j com `lhs[j] > rhs[j]`
pub fn first_excess(lhs: &[Units], rhs: &[Units]) -> Option<usize> {
    lhs.iter().zip(rhs).position(|(l, r)| l > r)
}
