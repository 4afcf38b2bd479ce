//! Heuristic component classification.
//!
//! An ordered rule table maps a node's label and style to a
//! [`ComponentType`]. Rules are evaluated first-match-wins, so order
//! matters: several keywords are substrings of later ones. Matching is
//! case-insensitive. The gate rules match their keyword as a whole word
//! of the label, otherwise "sensor" would trip the OR rule; every other
//! rule is plain substring containment, quirks included ("uc" matches
//! "Buck", "amp" matches "Lamp").

use crate::graph::ComponentType;

struct Rule {
    /// Label keywords matched as whole words
    label_words: &'static [&'static str],
    /// Label keywords matched as substrings
    label_substrings: &'static [&'static str],
    /// Style markers matched as substrings
    style_markers: &'static [&'static str],
    result: ComponentType,
}

const RULES: &[Rule] = &[
    Rule {
        label_words: &["and"],
        label_substrings: &["\u{2227}"],
        style_markers: &["shape=and"],
        result: ComponentType::AndGate,
    },
    Rule {
        label_words: &["or"],
        label_substrings: &["\u{2228}"],
        style_markers: &["shape=or"],
        result: ComponentType::OrGate,
    },
    Rule {
        label_words: &[],
        label_substrings: &["watchdog", "wdt"],
        style_markers: &[],
        result: ComponentType::Watchdog,
    },
    Rule {
        label_words: &[],
        label_substrings: &["sensor"],
        style_markers: &[],
        result: ComponentType::Sensor,
    },
    Rule {
        label_words: &[],
        label_substrings: &["mcu", "microcontroller", "cpu", "uc"],
        style_markers: &[],
        result: ComponentType::Mcu,
    },
    Rule {
        label_words: &[],
        label_substrings: &["adc"],
        style_markers: &[],
        result: ComponentType::Adc,
    },
    Rule {
        label_words: &[],
        label_substrings: &["ldo", "regulator"],
        style_markers: &[],
        result: ComponentType::LdoRegulator,
    },
    Rule {
        label_words: &[],
        label_substrings: &["comparator", "cmp"],
        style_markers: &[],
        result: ComponentType::Comparator,
    },
    Rule {
        label_words: &[],
        label_substrings: &["opamp", "op-amp", "op amp", "amp"],
        style_markers: &[],
        result: ComponentType::OpAmp,
    },
    Rule {
        label_words: &[],
        label_substrings: &["mosfet", "fet"],
        style_markers: &[],
        result: ComponentType::Mosfet,
    },
    Rule {
        label_words: &[],
        label_substrings: &["connector", "conn", "stecker", "pin"],
        style_markers: &[],
        result: ComponentType::Connector,
    },
    Rule {
        label_words: &[],
        label_substrings: &["can", "lin", "uart", "spi", "i2c", "ethernet"],
        style_markers: &[],
        result: ComponentType::Interface,
    },
    Rule {
        label_words: &[],
        label_substrings: &["battery", "charger", "buck", "boost", "power", "psu"],
        style_markers: &[],
        result: ComponentType::Power,
    },
];

/// Guess the component type for a node. Pure and deterministic.
pub fn classify(label: &str, style: &str) -> ComponentType {
    let label = label.to_lowercase();
    let style = style.to_lowercase();
    for rule in RULES {
        let hit = rule.label_words.iter().any(|w| has_word(&label, w))
            || rule.label_substrings.iter().any(|s| label.contains(s))
            || rule.style_markers.iter().any(|m| style.contains(m));
        if hit {
            return rule.result;
        }
    }
    ComponentType::Function
}

fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_rules() {
        assert_eq!(classify("AND", ""), ComponentType::AndGate);
        assert_eq!(classify("\u{2227}", ""), ComponentType::AndGate);
        assert_eq!(classify("", "shape=and;fillColor=#fff"), ComponentType::AndGate);
        assert_eq!(classify("OR gate", ""), ComponentType::OrGate);
        assert_eq!(classify("", "shape=or"), ComponentType::OrGate);
    }

    #[test]
    fn test_rule_order_precedence() {
        // rule 1 precedes rule 4
        assert_eq!(classify("AND gate sensor", ""), ComponentType::AndGate);
        // "watchdog" wins over the "uc" substring in rule 5
        assert_eq!(classify("Watchdog uC", ""), ComponentType::Watchdog);
    }

    #[test]
    fn test_sensor_is_not_an_or_gate() {
        // gate keywords are whole-word matches, so the "or" inside
        // "sensor" does not fire rule 2
        assert_eq!(classify("Temp Sensor", ""), ComponentType::Sensor);
        assert_eq!(classify("Comparator", ""), ComponentType::Comparator);
    }

    #[test]
    fn test_keyword_sets() {
        assert_eq!(classify("Main MCU", ""), ComponentType::Mcu);
        assert_eq!(classify("microcontroller", ""), ComponentType::Mcu);
        assert_eq!(classify("ADC1", ""), ComponentType::Adc);
        assert_eq!(classify("3V3 LDO", ""), ComponentType::LdoRegulator);
        assert_eq!(classify("Voltage Regulator", ""), ComponentType::LdoRegulator);
        assert_eq!(classify("CMP2", ""), ComponentType::Comparator);
        assert_eq!(classify("Op-Amp", ""), ComponentType::OpAmp);
        assert_eq!(classify("High side MOSFET", ""), ComponentType::Mosfet);
        assert_eq!(classify("Stecker X1", ""), ComponentType::Connector);
        assert_eq!(classify("UART bridge", ""), ComponentType::Interface);
        assert_eq!(classify("Battery pack", ""), ComponentType::Power);
        assert_eq!(classify("Block A", ""), ComponentType::Function);
    }

    #[test]
    fn test_substring_quirks_are_preserved() {
        // documented heuristic behaviour, not accidents
        assert_eq!(classify("Buck", ""), ComponentType::Mcu); // "uc"
        assert_eq!(classify("Lamp", ""), ComponentType::OpAmp); // "amp"
    }

    #[test]
    fn test_case_insensitive_and_deterministic() {
        assert_eq!(classify("tEmP sEnSoR", ""), ComponentType::Sensor);
        for _ in 0..3 {
            assert_eq!(classify("WDT", ""), ComponentType::Watchdog);
        }
    }
}
