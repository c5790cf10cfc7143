//! `field:operator:value` filter arguments.

use anyhow::{bail, Context, Result};
use erp_common::{FilterState, Operator};

#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub field: String,
    pub operator: Operator,
    pub value: String,
    pub value_to: Option<String>,
}

impl std::str::FromStr for FilterArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let (Some(field), Some(operator), Some(rest)) = (parts.next(), parts.next(), parts.next())
        else {
            bail!(
                "Invalid filter '{}'. Expected field:operator:value or field:between:from:to",
                s
            );
        };
        if field.is_empty() {
            bail!("Invalid filter '{}': field name is empty", s);
        }
        let operator: Operator = operator
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid filter '{}'", s))?;

        // `from..to` allows bounds that contain colons, such as times
        let (value, value_to) = if operator.is_range() {
            match rest.split_once("..").or_else(|| rest.split_once(':')) {
                Some((from, to)) => (from.to_string(), Some(to.to_string())),
                None => bail!("Invalid filter '{}': between needs from:to or from..to", s),
            }
        } else {
            (rest.to_string(), None)
        };

        Ok(Self {
            field: field.to_string(),
            operator,
            value,
            value_to,
        })
    }
}

impl FilterArg {
    pub fn apply(&self, state: &mut FilterState) -> Result<()> {
        state.set_operator(&self.field, self.operator)?;
        state.set_value(&self.field, self.value.as_str())?;
        if let Some(to) = &self.value_to {
            state.set_value_to(&self.field, to.as_str())?;
        }
        Ok(())
    }
}

/// Parses every argument and applies it, in order, to `state`.
pub fn apply_all(args: &[String], state: &mut FilterState) -> Result<()> {
    for raw in args {
        let arg: FilterArg = raw.parse()?;
        arg.apply(state)
            .with_context(|| format!("Cannot apply filter '{}'", raw))?;
    }
    Ok(())
}
