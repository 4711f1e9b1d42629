//! Contextual Arabic reshaping.
//!
//! Maps each Arabic letter to its presentation form (isolated, final, initial
//! or medial) according to the letters around it, and folds lam + alef pairs
//! into their mandatory ligature. Characters without an entry in the table
//! pass through untouched.

/// Presentation forms of a single letter.
///
/// A letter with no `initial`/`medial` form only joins the letter before it
/// (right-joining). A letter with no `final_form` never joins at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Forms {
    isolated: char,
    final_form: Option<char>,
    initial: Option<char>,
    medial: Option<char>,
}

impl Forms {
    const fn dual(isolated: char, final_form: char, initial: char, medial: char) -> Self {
        Self {
            isolated,
            final_form: Some(final_form),
            initial: Some(initial),
            medial: Some(medial),
        }
    }

    const fn right(isolated: char, final_form: char) -> Self {
        Self {
            isolated,
            final_form: Some(final_form),
            initial: None,
            medial: None,
        }
    }

    const fn none(isolated: char) -> Self {
        Self {
            isolated,
            final_form: None,
            initial: None,
            medial: None,
        }
    }

    /// Can connect to the letter that follows it in logical order.
    fn joins_next(&self) -> bool {
        self.initial.is_some()
    }

    /// Can connect to the letter that precedes it in logical order.
    fn joins_previous(&self) -> bool {
        self.final_form.is_some()
    }

    fn select(&self, after_joiner: bool, before_joiner: bool) -> char {
        match (after_joiner, before_joiner) {
            (true, true) => self.medial.or(self.final_form).unwrap_or(self.isolated),
            (true, false) => self.final_form.unwrap_or(self.isolated),
            (false, true) => self.initial.unwrap_or(self.isolated),
            (false, false) => self.isolated,
        }
    }
}

const TATWEEL: char = '\u{0640}';
const LAM: char = '\u{0644}';

fn letter_forms(ch: char) -> Option<Forms> {
    let forms = match ch {
        '\u{0621}' => Forms::none('\u{FE80}'),
        '\u{0622}' => Forms::right('\u{FE81}', '\u{FE82}'),
        '\u{0623}' => Forms::right('\u{FE83}', '\u{FE84}'),
        '\u{0624}' => Forms::right('\u{FE85}', '\u{FE86}'),
        '\u{0625}' => Forms::right('\u{FE87}', '\u{FE88}'),
        '\u{0626}' => Forms::dual('\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}'),
        '\u{0627}' => Forms::right('\u{FE8D}', '\u{FE8E}'),
        '\u{0628}' => Forms::dual('\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}'),
        '\u{0629}' => Forms::right('\u{FE93}', '\u{FE94}'),
        '\u{062A}' => Forms::dual('\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}'),
        '\u{062B}' => Forms::dual('\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}'),
        '\u{062C}' => Forms::dual('\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}'),
        '\u{062D}' => Forms::dual('\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}'),
        '\u{062E}' => Forms::dual('\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}'),
        '\u{062F}' => Forms::right('\u{FEA9}', '\u{FEAA}'),
        '\u{0630}' => Forms::right('\u{FEAB}', '\u{FEAC}'),
        '\u{0631}' => Forms::right('\u{FEAD}', '\u{FEAE}'),
        '\u{0632}' => Forms::right('\u{FEAF}', '\u{FEB0}'),
        '\u{0633}' => Forms::dual('\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}'),
        '\u{0634}' => Forms::dual('\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}'),
        '\u{0635}' => Forms::dual('\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}'),
        '\u{0636}' => Forms::dual('\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}'),
        '\u{0637}' => Forms::dual('\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}'),
        '\u{0638}' => Forms::dual('\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}'),
        '\u{0639}' => Forms::dual('\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}'),
        '\u{063A}' => Forms::dual('\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}'),
        TATWEEL => Forms::dual(TATWEEL, TATWEEL, TATWEEL, TATWEEL),
        '\u{0641}' => Forms::dual('\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}'),
        '\u{0642}' => Forms::dual('\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}'),
        '\u{0643}' => Forms::dual('\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}'),
        LAM => Forms::dual('\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}'),
        '\u{0645}' => Forms::dual('\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}'),
        '\u{0646}' => Forms::dual('\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}'),
        '\u{0647}' => Forms::dual('\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}'),
        '\u{0648}' => Forms::right('\u{FEED}', '\u{FEEE}'),
        '\u{0649}' => Forms::right('\u{FEEF}', '\u{FEF0}'),
        '\u{064A}' => Forms::dual('\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}'),
        // Persian and Urdu letters commonly mixed into Gulf labels.
        '\u{067E}' => Forms::dual('\u{FB56}', '\u{FB57}', '\u{FB58}', '\u{FB59}'),
        '\u{0686}' => Forms::dual('\u{FB7A}', '\u{FB7B}', '\u{FB7C}', '\u{FB7D}'),
        '\u{0698}' => Forms::right('\u{FB8A}', '\u{FB8B}'),
        '\u{06A9}' => Forms::dual('\u{FB8E}', '\u{FB8F}', '\u{FB90}', '\u{FB91}'),
        '\u{06AF}' => Forms::dual('\u{FB92}', '\u{FB93}', '\u{FB94}', '\u{FB95}'),
        '\u{06CC}' => Forms::dual('\u{FBFC}', '\u{FBFD}', '\u{FBFE}', '\u{FBFF}'),
        _ => return None,
    };
    Some(forms)
}

/// Lam-alef ligature for the alef variant following a lam.
fn lam_alef_forms(alef: char) -> Option<Forms> {
    let forms = match alef {
        '\u{0622}' => Forms::right('\u{FEF5}', '\u{FEF6}'),
        '\u{0623}' => Forms::right('\u{FEF7}', '\u{FEF8}'),
        '\u{0625}' => Forms::right('\u{FEF9}', '\u{FEFA}'),
        '\u{0627}' => Forms::right('\u{FEFB}', '\u{FEFC}'),
        _ => return None,
    };
    Some(forms)
}

/// Harakat and other combining marks that do not break a join.
fn is_transparent(ch: char) -> bool {
    matches!(
        ch,
        '\u{0610}'..='\u{061A}'
            | '\u{064B}'..='\u{065F}'
            | '\u{0670}'
            | '\u{06D6}'..='\u{06DC}'
            | '\u{06DF}'..='\u{06E4}'
            | '\u{06E7}'
            | '\u{06E8}'
            | '\u{06EA}'..='\u{06ED}'
    )
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Letter(Forms),
    Mark(char),
    Other(char),
}

fn units(text: &str) -> Vec<Unit> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::with_capacity(chars.len());
    let mut idx = 0;

    while idx < chars.len() {
        let ch = chars[idx];
        idx += 1;

        if ch == LAM {
            // Marks on the lam sit between it and the alef; they follow the ligature.
            let marks = chars[idx..]
                .iter()
                .take_while(|mark| is_transparent(**mark))
                .count();
            if let Some(ligature) = chars.get(idx + marks).copied().and_then(lam_alef_forms) {
                out.push(Unit::Letter(ligature));
                out.extend(chars[idx..idx + marks].iter().map(|mark| Unit::Mark(*mark)));
                idx += marks + 1;
                continue;
            }
        }

        let unit = match letter_forms(ch) {
            Some(forms) => Unit::Letter(forms),
            None if is_transparent(ch) => Unit::Mark(ch),
            None => Unit::Other(ch),
        };
        out.push(unit);
    }

    out
}

/// Reshape `text` into Arabic presentation forms, keeping logical order.
pub fn reshape(text: &str) -> String {
    let units = units(text);
    let mut out = String::with_capacity(text.len() * 3);

    for (idx, unit) in units.iter().enumerate() {
        match unit {
            Unit::Mark(ch) | Unit::Other(ch) => out.push(*ch),
            Unit::Letter(forms) => {
                let previous = neighbour(units[..idx].iter().rev());
                let next = neighbour(units[idx + 1..].iter());

                let after_joiner = forms.joins_previous()
                    && previous.is_some_and(|prev| prev.joins_next());
                let before_joiner =
                    forms.joins_next() && next.is_some_and(|next| next.joins_previous());

                out.push(forms.select(after_joiner, before_joiner));
            }
        }
    }

    out
}

/// Closest letter in the given direction, skipping combining marks.
fn neighbour<'a>(mut iter: impl Iterator<Item = &'a Unit>) -> Option<Forms> {
    iter.find_map(|unit| match unit {
        Unit::Mark(_) => None,
        Unit::Letter(forms) => Some(Some(*forms)),
        Unit::Other(_) => Some(None),
    })
    .flatten()
}
