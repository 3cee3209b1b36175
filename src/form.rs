use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use crate::types::{AssessmentInput, Compliance, IndustryType, WorkerSafety};

pub const TITLE: &str = "AI-Assisted Carbon Footprint & ESG Assessment System";
pub const INTRO: &str = "This sustainability assessment takes approximately 1–2 minutes.";

/// Errors while reading questionnaire answers.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("input ended before the questionnaire was complete")]
    EndOfInput,
}

/// Step-by-step questionnaire over any line source.
/// The start gate is per-questionnaire state.
pub struct Questionnaire<R, W> {
    input: R,
    output: W,
    started: bool,
}

impl<R: BufRead, W: Write> Questionnaire<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            started: false,
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String, FormError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(FormError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Show the intro and ask to begin. Returns whether the user started.
    pub fn start_gate(&mut self) -> Result<bool, FormError> {
        if self.started {
            return Ok(true);
        }
        writeln!(self.output, "{TITLE}")?;
        writeln!(self.output, "{INTRO}")?;
        write!(self.output, "Start Assessment? [y/N]: ")?;
        self.output.flush()?;
        let answer = self.read_line()?.to_ascii_lowercase();
        self.started = matches!(answer.as_str(), "y" | "yes");
        Ok(self.started)
    }

    /// Ask for a number at or above `min`, re-asking until one is given.
    pub fn ask_number(&mut self, prompt: &str, min: f64) -> Result<f64, FormError> {
        loop {
            write!(self.output, "{prompt}: ")?;
            self.output.flush()?;
            let raw = self.read_line()?;
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= min => return Ok(v),
                Ok(_) => writeln!(self.output, "Please enter a number of at least {min}.")?,
                Err(_) => writeln!(self.output, "'{raw}' is not a number.")?,
            }
        }
    }

    /// Numbered choice; accepts either the index or the label itself.
    pub fn ask_choice<T>(&mut self, prompt: &str, options: &[T]) -> Result<T, FormError>
    where
        T: Copy + std::fmt::Display + FromStr,
    {
        loop {
            writeln!(self.output, "{prompt}")?;
            for (i, opt) in options.iter().enumerate() {
                writeln!(self.output, "  {}) {}", i + 1, opt)?;
            }
            write!(self.output, "> ")?;
            self.output.flush()?;
            let raw = self.read_line()?;
            if let Ok(n) = raw.parse::<usize>() {
                if (1..=options.len()).contains(&n) {
                    return Ok(options[n - 1]);
                }
            } else if let Ok(v) = raw.parse::<T>() {
                return Ok(v);
            }
            writeln!(self.output, "Please pick one of the listed options.")?;
        }
    }

    /// Run the gate and every prompt. `None` means the user declined to start.
    pub fn collect(&mut self) -> Result<Option<AssessmentInput>, FormError> {
        if !self.start_gate()? {
            return Ok(None);
        }
        writeln!(self.output, "Sustainability Questionnaire")?;

        let industry_type = self.ask_choice("Industry Type", &IndustryType::ALL)?;
        let electricity_kwh = self.ask_number("Monthly Electricity Usage (kWh)", 0.0)?;
        let solar_kwh = self.ask_number("Solar Energy Usage (kWh)", 0.0)?;
        let diesel_litres = self.ask_number("Monthly Diesel Consumption (litres)", 0.0)?;
        let lpg_kg = self.ask_number("Monthly LPG Usage (kg)", 0.0)?;
        let production_units = self.ask_number("Monthly Production Output (units)", 1.0)?;
        let worker_safety = self.ask_choice("Worker Safety Standards", &WorkerSafety::ALL)?;
        let compliance = self.ask_choice("Regulatory Compliance", &Compliance::ALL)?;

        Ok(Some(AssessmentInput {
            industry_type,
            electricity_kwh,
            solar_kwh,
            diesel_litres,
            lpg_kg,
            production_units,
            worker_safety,
            compliance,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<Option<AssessmentInput>, FormError>, String) {
        let mut q = Questionnaire::new(Cursor::new(script.to_string()), Vec::new());
        let res = q.collect();
        let out = String::from_utf8(q.into_output()).unwrap();
        (res, out)
    }

    #[test]
    fn test_full_questionnaire() {
        let (res, out) = run("y\n3\n1000\n200\n50\n20\n100\nGood\n1\n");
        let input = res.unwrap().unwrap();
        assert_eq!(input.industry_type, IndustryType::FoodProcessing);
        assert_eq!(input.electricity_kwh, 1000.0);
        assert_eq!(input.solar_kwh, 200.0);
        assert_eq!(input.production_units, 100.0);
        assert_eq!(input.worker_safety, WorkerSafety::Good);
        assert_eq!(input.compliance, Compliance::FullyCompliant);
        assert!(out.contains(INTRO));
        assert!(out.contains("  5) Other"));
    }

    #[test]
    fn test_declined_gate_collects_nothing() {
        let mut q = Questionnaire::new(Cursor::new("n\n".to_string()), Vec::new());
        assert!(q.collect().unwrap().is_none());
        assert!(!q.started());
    }

    #[test]
    fn test_bad_numbers_are_reasked() {
        let (res, out) = run("yes\n1\nlots\n-5\n400\n0\n0\n0\n0\n2\nPoor\nnon-compliant\n");
        let input = res.unwrap().unwrap();
        assert_eq!(input.electricity_kwh, 400.0);
        assert_eq!(input.production_units, 2.0);
        assert_eq!(input.worker_safety, WorkerSafety::Poor);
        assert_eq!(input.compliance, Compliance::NonCompliant);
        assert!(out.contains("'lots' is not a number."));
        assert!(out.contains("Please enter a number of at least 0."));
        assert!(out.contains("Please enter a number of at least 1."));
    }

    #[test]
    fn test_out_of_range_choice_is_reasked() {
        let (res, out) = run("y\n9\nTextile\n1\n0\n0\n0\n1\n1\n1\n");
        assert_eq!(res.unwrap().unwrap().industry_type, IndustryType::Textile);
        assert!(out.contains("Please pick one of the listed options."));
    }

    #[test]
    fn test_truncated_input_errors() {
        let (res, _) = run("y\n1\n100\n");
        assert!(matches!(res, Err(FormError::EndOfInput)));
    }
}
