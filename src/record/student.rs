//! Student entity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// One student record.
///
/// Text fields are held as ordinary strings; they are bounded only when
/// encoded (see [`super::fit_text`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Lookup key. Uniqueness is not guaranteed by the store.
    pub roll_number: i32,
    pub name: String,
    pub student_class: String,
    pub address: String,
    pub total_score: f32,
    pub fee_paid: bool,
}

/// The fields an update may change. Everything else is fixed at append time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amendment {
    pub total_score: f32,
    pub fee_paid: bool,
}

impl Amendment {
    /// The score must be a finite, non-negative number
    pub fn validate(&self) -> Result<()> {
        if !self.total_score.is_finite() || self.total_score < 0.0 {
            return Err(StoreError::InvalidRecord(format!(
                "total score must be a non-negative number, got {}",
                self.total_score
            )));
        }
        Ok(())
    }
}

impl Student {
    pub fn new(
        roll_number: i32,
        name: impl Into<String>,
        student_class: impl Into<String>,
        address: impl Into<String>,
        total_score: f32,
        fee_paid: bool,
    ) -> Self {
        Self {
            roll_number,
            name: name.into(),
            student_class: student_class.into(),
            address: address.into(),
            total_score,
            fee_paid,
        }
    }

    /// Check the value rules enforced before anything is written:
    /// a positive roll number and a finite, non-negative score.
    pub fn validate(&self) -> Result<()> {
        if self.roll_number <= 0 {
            return Err(StoreError::InvalidRecord(format!(
                "roll number must be positive, got {}",
                self.roll_number
            )));
        }
        self.amendment().validate()
    }

    /// Current values of the mutable fields
    pub fn amendment(&self) -> Amendment {
        Amendment {
            total_score: self.total_score,
            fee_paid: self.fee_paid,
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "--------------------------------------------";

        writeln!(f, "{RULE}")?;
        writeln!(f, "   STUDENT DETAILS (Roll No: {})", self.roll_number)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Name:             {}", self.name)?;
        writeln!(f, "Class:            {}", self.student_class)?;
        writeln!(f, "Address:          {}", self.address)?;
        writeln!(f, "Total Score:      {:.2}", self.total_score)?;
        writeln!(
            f,
            "Fee Status:       {}",
            if self.fee_paid { "PAID" } else { "NOT PAID" }
        )?;
        write!(f, "{RULE}")
    }
}
