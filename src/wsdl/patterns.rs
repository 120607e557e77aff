//! Predefined message exchange patterns (WSDL 2.0 Adjuncts, section 2)

use super::components::Direction;

/// Pattern used when an operation does not name one
pub const DEFAULT_PATTERN: &str = "http://www.w3.org/ns/wsdl/in-out";

/// How faults relate to the messages of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultRule {
    /// A fault takes the place of the message with the same direction
    FaultReplacesMessage,
    /// A fault is sent in reply to a message flowing the other way
    MessageTriggersFault,
    /// The pattern allows no faults
    NoFaults,
}

/// A predefined message exchange pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// Pattern IRI
    pub iri: &'static str,
    /// Message placeholders, in pattern order
    pub placeholders: &'static [(&'static str, Direction)],
    /// Fault propagation rule
    pub fault_rule: FaultRule,
}

const PATTERNS: &[Pattern] = &[
    Pattern {
        iri: "http://www.w3.org/ns/wsdl/in-only",
        placeholders: &[("In", Direction::In)],
        fault_rule: FaultRule::NoFaults,
    },
    Pattern {
        iri: "http://www.w3.org/ns/wsdl/robust-in-only",
        placeholders: &[("In", Direction::In)],
        fault_rule: FaultRule::MessageTriggersFault,
    },
    Pattern {
        iri: "http://www.w3.org/ns/wsdl/in-out",
        placeholders: &[("In", Direction::In), ("Out", Direction::Out)],
        fault_rule: FaultRule::FaultReplacesMessage,
    },
    Pattern {
        iri: "http://www.w3.org/ns/wsdl/in-opt-out",
        placeholders: &[("In", Direction::In), ("Out", Direction::Out)],
        fault_rule: FaultRule::MessageTriggersFault,
    },
    Pattern {
        iri: "http://www.w3.org/ns/wsdl/out-only",
        placeholders: &[("Out", Direction::Out)],
        fault_rule: FaultRule::NoFaults,
    },
    Pattern {
        iri: "http://www.w3.org/ns/wsdl/robust-out-only",
        placeholders: &[("Out", Direction::Out)],
        fault_rule: FaultRule::MessageTriggersFault,
    },
    Pattern {
        iri: "http://www.w3.org/ns/wsdl/out-in",
        placeholders: &[("Out", Direction::Out), ("In", Direction::In)],
        fault_rule: FaultRule::FaultReplacesMessage,
    },
    Pattern {
        iri: "http://www.w3.org/ns/wsdl/out-opt-in",
        placeholders: &[("Out", Direction::Out), ("In", Direction::In)],
        fault_rule: FaultRule::MessageTriggersFault,
    },
];

/// Look up a predefined pattern by IRI
pub fn lookup(iri: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.iri == iri)
}

impl Pattern {
    /// Check whether `label` names one of this pattern's placeholders
    pub fn has_placeholder(&self, label: &str) -> bool {
        self.placeholders.iter().any(|(l, _)| *l == label)
    }

    /// The label a message reference gets when it names none: the only
    /// placeholder flowing in that direction, if exactly one exists
    pub fn default_message_label(&self, direction: Direction) -> Option<&'static str> {
        let mut matching = self.placeholders.iter().filter(|(_, d)| *d == direction);
        match (matching.next(), matching.next()) {
            (Some((label, _)), None) => Some(*label),
            _ => None,
        }
    }

    /// The label a fault reference gets when it names none
    pub fn default_fault_label(&self, direction: Direction) -> Option<&'static str> {
        match self.fault_rule {
            FaultRule::FaultReplacesMessage => self.default_message_label(direction),
            FaultRule::MessageTriggersFault => self.default_message_label(direction.reversed()),
            FaultRule::NoFaults => None,
        }
    }
}
