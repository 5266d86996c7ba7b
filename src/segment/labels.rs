/// Field names printed on the record cards. Every label carries the trailing
/// dash that the scans show after it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum FieldLabel {
    Regions,
    Nations,
    Actors,
    Committers,
    Locations,
    Intervenors,
    Mode,
    Magnitude,
    Combatants,
    Deaths,
    Force,
    Issues,
    Outcomes,
    Sources,
}

/// Labels that open a top-level field, in card order.
pub const TOP_LEVEL_LABELS: [FieldLabel; 11] = [
    FieldLabel::Regions,
    FieldLabel::Nations,
    FieldLabel::Actors,
    FieldLabel::Committers,
    FieldLabel::Locations,
    FieldLabel::Intervenors,
    FieldLabel::Mode,
    FieldLabel::Deaths,
    FieldLabel::Issues,
    FieldLabel::Outcomes,
    FieldLabel::Sources,
];

pub const MODE_LABELS: [FieldLabel; 2] = [FieldLabel::Magnitude, FieldLabel::Combatants];

pub const DEATHS_LABELS: [FieldLabel; 1] = [FieldLabel::Force];

/// Column order of the output table.
pub const ALL_LABELS: [FieldLabel; 14] = [
    FieldLabel::Regions,
    FieldLabel::Nations,
    FieldLabel::Actors,
    FieldLabel::Committers,
    FieldLabel::Locations,
    FieldLabel::Intervenors,
    FieldLabel::Mode,
    FieldLabel::Magnitude,
    FieldLabel::Combatants,
    FieldLabel::Deaths,
    FieldLabel::Force,
    FieldLabel::Issues,
    FieldLabel::Outcomes,
    FieldLabel::Sources,
];

impl FieldLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldLabel::Regions => "REGION(S)-",
            FieldLabel::Nations => "NATION(S)-",
            FieldLabel::Actors => "ACTOR(S)-",
            FieldLabel::Committers => "COMMITTER(S)-",
            FieldLabel::Locations => "LOCATION(S)-",
            FieldLabel::Intervenors => "INTERVENOR(S)-",
            FieldLabel::Mode => "MODE-",
            FieldLabel::Magnitude => "MAGNITUDE-",
            FieldLabel::Combatants => "COMBATANTS-",
            FieldLabel::Deaths => "DEATHS-",
            FieldLabel::Force => "FORCE-",
            FieldLabel::Issues => "ISSUE(S)-",
            FieldLabel::Outcomes => "OUTCOME(S)-",
            FieldLabel::Sources => "SOURCE(S)-",
        }
    }

    /// Sub-labels embedded in this field's value, if it is a composite field.
    pub fn nested_labels(self) -> &'static [FieldLabel] {
        match self {
            FieldLabel::Mode => &MODE_LABELS,
            FieldLabel::Deaths => &DEATHS_LABELS,
            _ => &[],
        }
    }
}
