use medtrack_core::Medication;
use std::fmt;
use std::str::FromStr;

/// A medication given on the command line as `NAME:FREQ[:REFILL_DATE]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationArg {
    pub name: String,
    pub frequency_per_day: u32,
    pub refill_date: Option<String>,
}

impl MedicationArg {
    /// Builds the medication; without a refill date it defaults to now.
    pub fn to_medication(&self) -> Medication {
        let medication = Medication::new(&self.name, self.frequency_per_day);
        match &self.refill_date {
            Some(date) => medication.with_refill_date_str(date),
            None => medication,
        }
    }
}

impl fmt::Display for MedicationArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.frequency_per_day)?;
        if let Some(date) = &self.refill_date {
            write!(f, ":{}", date)?;
        }
        Ok(())
    }
}

impl FromStr for MedicationArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The refill date may itself contain ':' (e.g. a full timestamp)
        let mut parts = s.splitn(3, ':');

        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(format!(
                "Invalid medication '{}'. Use NAME:FREQ[:REFILL_DATE]",
                s
            ));
        }

        let frequency_per_day = parts
            .next()
            .ok_or_else(|| format!("Missing frequency in '{}'. Use NAME:FREQ[:REFILL_DATE]", s))?
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid frequency in '{}'. Use a whole number of doses", s))?;

        let refill_date = parts
            .next()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        Ok(Self {
            name: name.to_string(),
            frequency_per_day,
            refill_date,
        })
    }
}
