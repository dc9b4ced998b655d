//! IF-THEN decision rule extraction from a (discretized) decision table

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use super::discretize::{discretize, BinningOutcome, DEFAULT_BINS};
use super::table::{DecisionTable, TableError, Value};

/// Default number of rules to keep
pub const DEFAULT_MAX_RULES: usize = 15;

/// Number of attributes consulted by the fallback rule scheme
const FALLBACK_ATTRIBUTES: usize = 3;

/// Number of values per attribute consulted by the fallback rule scheme
const FALLBACK_VALUES: usize = 2;

/// Human-readable label for a decision value
pub fn decision_label(decision: u8) -> &'static str {
    if decision == 1 {
        "Good Performance"
    } else {
        "Poor Performance"
    }
}

/// A single `attribute = value` condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub attribute: String,
    pub value: Value,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.attribute, self.value)
    }
}

/// A decision rule with its support and confidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRule {
    pub conditions: Vec<Condition>,
    pub decision: u8,
    /// Rows matching both the conditions and the decision
    pub support: usize,
    /// Support as a percentage of all rows
    pub confidence: f64,
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        write!(
            f,
            "IF {} THEN {} (Support: {}, Confidence: {:.1}%)",
            conditions.join(" AND "),
            decision_label(self.decision),
            self.support,
            self.confidence
        )
    }
}

/// Rules produced by [`generate_rules`]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RuleSet {
    /// Rules grouped over full condition combinations of the discretized table
    Primary {
        rules: Vec<DecisionRule>,
        discretization: Vec<(String, BinningOutcome)>,
    },
    /// Single-attribute majority rules, used when grouping failed
    Fallback {
        rules: Vec<DecisionRule>,
        reason: String,
    },
}

impl RuleSet {
    pub fn rules(&self) -> &[DecisionRule] {
        match self {
            RuleSet::Primary { rules, .. } | RuleSet::Fallback { rules, .. } => rules,
        }
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            RuleSet::Primary { .. } => None,
            RuleSet::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RuleSet::Fallback { .. })
    }
}

fn confidence(support: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        support as f64 / total as f64 * 100.0
    }
}

/// Generate up to `max_rules` rules over `attributes`, most supported first.
///
/// Numeric attributes are discretized into Low/Medium/High first. If grouping
/// fails the simplified per-attribute majority scheme is used instead and the
/// cause is carried in [`RuleSet::Fallback`].
pub fn generate_rules(table: &DecisionTable, attributes: &[String], max_rules: usize) -> RuleSet {
    generate_rules_binned(table, attributes, DEFAULT_BINS, max_rules)
}

/// [`generate_rules`] with an explicit bin count for numeric attributes.
pub fn generate_rules_binned(
    table: &DecisionTable,
    attributes: &[String],
    bins: usize,
    max_rules: usize,
) -> RuleSet {
    match grouped_rules(table, attributes, bins, max_rules) {
        Ok((rules, discretization)) => {
            debug!(rules = rules.len(), "generated grouped rules");
            RuleSet::Primary {
                rules,
                discretization,
            }
        }
        Err(err) => {
            let reason = err.to_string();
            info!(%reason, "using simplified rule generation");
            RuleSet::Fallback {
                rules: majority_rules(table, attributes, max_rules),
                reason,
            }
        }
    }
}

type GroupedRules = (Vec<DecisionRule>, Vec<(String, BinningOutcome)>);

/// Group the discretized table by (conditions..., decision) and rank by support.
fn grouped_rules(
    table: &DecisionTable,
    attributes: &[String],
    bins: usize,
    max_rules: usize,
) -> Result<GroupedRules, TableError> {
    let discretized = discretize(table, attributes, bins)?;
    let binned = &discretized.table;

    let columns: Vec<Vec<Value>> = attributes
        .iter()
        .map(|attr| binned.column_values(attr))
        .collect::<Result<_, _>>()?;
    let decisions = binned.decision_values()?;
    let total = binned.height();

    // (conditions, decision) -> slot in first-appearance order
    let mut index: HashMap<(Vec<Value>, u8), usize> = HashMap::new();
    let mut groups: Vec<(Vec<Value>, u8, usize)> = Vec::new();

    for (row, &decision) in decisions.iter().enumerate() {
        let key: Vec<Value> = columns.iter().map(|col| col[row].clone()).collect();
        match index.get(&(key.clone(), decision)) {
            Some(&slot) => groups[slot].2 += 1,
            None => {
                index.insert((key.clone(), decision), groups.len());
                groups.push((key, decision, 1));
            }
        }
    }

    // Stable sort keeps first-appearance order among equal supports
    groups.sort_by(|a, b| b.2.cmp(&a.2));

    let rules = groups
        .into_iter()
        .take(max_rules)
        .map(|(values, decision, support)| DecisionRule {
            conditions: attributes
                .iter()
                .cloned()
                .zip(values)
                .map(|(attribute, value)| Condition { attribute, value })
                .collect(),
            decision,
            support,
            confidence: confidence(support, total),
        })
        .collect();

    Ok((rules, discretized.outcomes))
}

/// Simplified rules: for each of the first three attributes, the two most frequent
/// raw values and the majority decision among rows holding that value.
///
/// Attributes that cannot be read are skipped.
pub fn majority_rules(
    table: &DecisionTable,
    attributes: &[String],
    max_rules: usize,
) -> Vec<DecisionRule> {
    let mut rules = Vec::new();
    let Ok(decisions) = table.decision_values() else {
        return rules;
    };
    let total = table.height();

    for attr in attributes.iter().take(FALLBACK_ATTRIBUTES) {
        if rules.len() >= max_rules {
            break;
        }
        let Ok(values) = table.column_values(attr) else {
            debug!(attribute = %attr, "skipping unreadable attribute");
            continue;
        };

        for value in most_frequent(&values, FALLBACK_VALUES) {
            if rules.len() >= max_rules {
                break;
            }
            let matching: Vec<u8> = values
                .iter()
                .zip(&decisions)
                .filter(|(v, _)| **v == value)
                .map(|(_, &d)| d)
                .collect();
            let Some((decision, support)) = majority(&matching) else {
                continue;
            };

            rules.push(DecisionRule {
                conditions: vec![Condition {
                    attribute: attr.clone(),
                    value,
                }],
                decision,
                support,
                confidence: confidence(support, total),
            });
        }
    }

    rules
}

/// The `n` most frequent values, ties broken by first appearance
fn most_frequent(values: &[Value], n: usize) -> Vec<Value> {
    let mut counts: Vec<(Value, usize)> = Vec::new();
    let mut index: HashMap<&Value, usize> = HashMap::new();
    for value in values {
        match index.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(v, _)| v).collect()
}

/// Majority decision and its count, ties broken by first appearance
fn majority(decisions: &[u8]) -> Option<(u8, usize)> {
    let first = *decisions.first()?;
    let ones = decisions.iter().filter(|&&d| d == 1).count();
    let zeros = decisions.len() - ones;
    let winner = match ones.cmp(&zeros) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => 0,
        std::cmp::Ordering::Equal => first,
    };
    Some((winner, if winner == 1 { ones } else { zeros }))
}
