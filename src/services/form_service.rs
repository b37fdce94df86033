use crate::error::AppError;
use crate::models::feature_types::{FeatureRecord, FeatureValue};
use crate::models::form_types::{Choice, Control, FieldGroup, FieldSpec, FormSchema};
use std::collections::HashMap;

pub const UNKNOWN_LABEL: &str = "Unknown";

const fn c(code: i64, label: &'static str) -> Choice {
    Choice { code, label }
}

pub const MARITAL_STATUS: &[Choice] = &[
    c(1, "Single"),
    c(2, "Married"),
    c(3, "Widower"),
    c(4, "Divorced"),
    c(5, "Facto union"),
    c(6, "Legally separated"),
];

pub const APPLICATION_MODE: &[Choice] = &[
    c(1, "1st phase - general contingent"),
    c(2, "Ordinance No. 612/93"),
    c(5, "1st phase - special contingent (Azores Island)"),
    c(7, "Holders of other higher courses"),
    c(10, "Ordinance No. 854-B/99"),
    c(15, "International student (bachelor)"),
    c(16, "1st phase - special contingent (Madeira Island)"),
    c(17, "2nd phase - general contingent"),
    c(18, "3rd phase - general contingent"),
    c(26, "Ordinance No. 533-A/99, item b2) (Different Plan)"),
    c(27, "Ordinance No. 533-A/99, item b3 (Other Institution)"),
    c(39, "Over 23 years old"),
    c(42, "Transfer"),
    c(43, "Change of course"),
    c(44, "Technological specialization diploma holders"),
    c(51, "Change of institution/course"),
    c(53, "Short cycle diploma holders"),
    c(57, "Change of institution/course (International)"),
];

pub const COURSE: &[Choice] = &[
    c(33, "Biofuel Production Technologies"),
    c(171, "Animation and Multimedia Design"),
    c(8014, "Social Service (evening attendance)"),
    c(9003, "Agronomy"),
    c(9070, "Communication Design"),
    c(9085, "Veterinary Nursing"),
    c(9119, "Informatics Engineering"),
    c(9130, "Equinculture"),
    c(9147, "Management"),
    c(9238, "Social Service"),
    c(9254, "Tourism"),
    c(9500, "Nursing"),
    c(9556, "Oral Hygiene"),
    c(9670, "Advertising and Marketing Management"),
    c(9773, "Journalism and Communication"),
    c(9853, "Basic Education"),
    c(9991, "Management (evening attendance)"),
];

pub const ATTENDANCE: &[Choice] = &[c(1, "Daytime"), c(0, "Evening")];

pub const PREVIOUS_QUALIFICATION: &[Choice] = &[
    c(1, "Secondary education"),
    c(2, "Higher education - bachelor's degree"),
    c(3, "Higher education - degree"),
    c(4, "Higher education - master's"),
    c(5, "Higher education - doctorate"),
    c(6, "Frequency of higher education"),
    c(9, "12th year of schooling - not completed"),
    c(10, "11th year of schooling - not completed"),
    c(12, "Other - 11th year of schooling"),
    c(14, "10th year of schooling"),
    c(15, "10th year of schooling - not completed"),
    c(19, "Basic education 3rd cycle (9th/10th/11th year) or equiv."),
    c(38, "Basic education 2nd cycle (6th/7th/8th year) or equiv."),
    c(39, "Technological specialization course"),
    c(40, "Higher education - degree (1st cycle)"),
    c(42, "Professional higher technical course"),
    c(43, "Higher education - master (2nd cycle)"),
];

pub const NATIONALITY: &[Choice] = &[
    c(1, "Portuguese"),
    c(2, "German"),
    c(6, "Spanish"),
    c(11, "Italian"),
    c(13, "Dutch"),
    c(14, "English"),
    c(17, "Lithuanian"),
    c(21, "Angolan"),
    c(22, "Cape Verdean"),
    c(24, "Guinean"),
    c(25, "Mozambican"),
    c(26, "Santomean"),
    c(32, "Turkish"),
    c(41, "Brazilian"),
    c(62, "Romanian"),
    c(100, "Moldova (Republic of)"),
    c(101, "Mexican"),
    c(103, "Ukrainian"),
    c(105, "Russian"),
    c(108, "Cuban"),
    c(109, "Colombian"),
];

pub const YES_NO: &[Choice] = &[c(1, "Yes"), c(0, "No")];

pub const GENDER: &[Choice] = &[c(1, "Male"), c(0, "Female")];

/// Display label for `code`, or the `"Unknown"` sentinel.
pub fn label_for(choices: &[Choice], code: i64) -> &'static str {
    choices
        .iter()
        .find(|choice| choice.code == code)
        .map(|choice| choice.label)
        .unwrap_or(UNKNOWN_LABEL)
}

const fn select(
    name: &'static str,
    label: &'static str,
    help: Option<&'static str>,
    choices: &'static [Choice],
    default: i64,
    show_code: bool,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        help,
        control: Control::Select {
            choices,
            default,
            show_code,
        },
    }
}

const fn flag(name: &'static str, label: &'static str, default: i64) -> FieldSpec {
    select(name, label, None, YES_NO, default, false)
}

const fn integer(
    name: &'static str,
    label: &'static str,
    help: Option<&'static str>,
    min: i64,
    max: i64,
    default: i64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        help,
        control: Control::Integer { min, max, default },
    }
}

const fn decimal(
    name: &'static str,
    label: &'static str,
    help: Option<&'static str>,
    min: f64,
    max: f64,
    default: f64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        help,
        control: Control::Decimal {
            min,
            max,
            default,
            step: 0.1,
        },
    }
}

const DEMOGRAPHICS: &[FieldSpec] = &[
    select("Marital_status", "Marital status", Some("Select the student's marital status."), MARITAL_STATUS, 1, true),
    integer("Age_at_enrollment", "Age at enrollment", Some("Age of the student at enrollment."), 15, 70, 20),
    select("Nacionality", "Nationality", Some("Nationality of the student."), NATIONALITY, 1, true),
    select("Gender", "Gender", Some("Gender of the student."), GENDER, 1, false),
    flag("Displaced", "Displaced (comes from a different region?)", 0),
    flag("International", "International student", 0),
    flag("Educational_special_needs", "Educational special needs", 0),
];

const APPLICATION: &[FieldSpec] = &[
    select("Application_mode", "Application mode", Some("Application method used by the student."), APPLICATION_MODE, 1, true),
    integer("Application_order", "Application order", Some("0 for first choice, up to 9 for last choice."), 0, 9, 1),
    select("Course", "Course", Some("Course taken by the student."), COURSE, 33, true),
    select("Previous_qualification", "Previous qualification", Some("Qualification obtained before enrollment."), PREVIOUS_QUALIFICATION, 1, true),
    decimal("Previous_qualification_grade", "Previous qualification grade", Some("Grade of the previous qualification (0-200 scale)."), 0.0, 200.0, 120.0),
    decimal("Admission_grade", "Admission grade", Some("Admission grade for the current course (0-200 scale)."), 0.0, 200.0, 120.0),
    select("Daytime_evening_attendance", "Daytime/evening attendance", None, ATTENDANCE, 1, false),
];

const PARENTS_AND_FINANCES: &[FieldSpec] = &[
    integer("Mothers_qualification", "Mother's qualification (code)", Some("Numeric code of the mother's qualification, see the data dictionary."), 1, 44, 19),
    integer("Fathers_qualification", "Father's qualification (code)", Some("Numeric code of the father's qualification, see the data dictionary."), 1, 44, 19),
    integer("Mothers_occupation", "Mother's occupation (code)", Some("Numeric code of the mother's occupation, see the data dictionary."), 0, 194, 9),
    integer("Fathers_occupation", "Father's occupation (code)", Some("Numeric code of the father's occupation, see the data dictionary."), 0, 195, 9),
    flag("Debtor", "Debtor (owes the institution?)", 0),
    flag("Tuition_fees_up_to_date", "Tuition fees up to date", 1),
    flag("Scholarship_holder", "Scholarship holder", 0),
];

const FIRST_SEMESTER: &[FieldSpec] = &[
    integer("Curricular_units_1st_sem_credited", "1st semester: units credited", None, 0, 30, 0),
    integer("Curricular_units_1st_sem_enrolled", "1st semester: units enrolled", None, 0, 30, 6),
    integer("Curricular_units_1st_sem_evaluations", "1st semester: unit evaluations", Some("Number of evaluations taken."), 0, 50, 6),
    integer("Curricular_units_1st_sem_approved", "1st semester: units approved", None, 0, 30, 5),
    decimal("Curricular_units_1st_sem_grade", "1st semester: grade average", Some("Average grade of approved units (0-20 scale)."), 0.0, 20.0, 12.0),
    integer("Curricular_units_1st_sem_without_evaluations", "1st semester: units without evaluations", None, 0, 20, 0),
];

const SECOND_SEMESTER: &[FieldSpec] = &[
    integer("Curricular_units_2nd_sem_credited", "2nd semester: units credited", None, 0, 30, 0),
    integer("Curricular_units_2nd_sem_enrolled", "2nd semester: units enrolled", None, 0, 30, 6),
    integer("Curricular_units_2nd_sem_evaluations", "2nd semester: unit evaluations", Some("Number of evaluations taken."), 0, 50, 6),
    integer("Curricular_units_2nd_sem_approved", "2nd semester: units approved", None, 0, 30, 5),
    decimal("Curricular_units_2nd_sem_grade", "2nd semester: grade average", Some("Average grade of approved units (0-20 scale)."), 0.0, 20.0, 12.0),
    integer("Curricular_units_2nd_sem_without_evaluations", "2nd semester: units without evaluations", None, 0, 20, 0),
];

const ECONOMY: &[FieldSpec] = &[
    decimal("Unemployment_rate", "Unemployment rate (%)", None, 0.0, 50.0, 10.0),
    decimal("Inflation_rate", "Inflation rate (%)", None, -5.0, 10.0, 1.0),
    decimal("GDP", "GDP growth (%)", None, -10.0, 10.0, 1.0),
];

pub const SCHEMA: FormSchema = FormSchema {
    title: "Student Academic Outcome Prediction",
    submit_label: "Predict student status",
    groups: &[
        FieldGroup { title: "Demographics & Background", fields: DEMOGRAPHICS },
        FieldGroup { title: "Application & Previous Education", fields: APPLICATION },
        FieldGroup { title: "Parents & Finances", fields: PARENTS_AND_FINANCES },
        FieldGroup { title: "Academic Performance - 1st Semester", fields: FIRST_SEMESTER },
        FieldGroup { title: "Academic Performance - 2nd Semester", fields: SECOND_SEMESTER },
        FieldGroup { title: "Socio-economic Context", fields: ECONOMY },
    ],
};

pub fn schema() -> &'static FormSchema {
    &SCHEMA
}

pub fn fields() -> impl Iterator<Item = &'static FieldSpec> {
    SCHEMA.groups.iter().flat_map(|group| group.fields.iter())
}

pub fn field(name: &str) -> Option<&'static FieldSpec> {
    fields().find(|f| f.name == name)
}

/// One record with every control at its default.
pub fn default_record() -> FeatureRecord {
    fields()
        .map(|f| {
            let value = match f.control {
                Control::Select { default, .. } | Control::Integer { default, .. } => FeatureValue::Code(default),
                Control::Decimal { default, .. } => FeatureValue::Measure(default),
            };
            (f.name, value)
        })
        .collect()
}

fn check(spec: &FieldSpec, value: FeatureValue) -> Result<FeatureValue, AppError> {
    match spec.control {
        Control::Select { choices, .. } => {
            let code = value
                .as_code()
                .filter(|code| choices.iter().any(|choice| choice.code == *code))
                .ok_or_else(|| {
                    AppError::invalid_input(format!("{}: {} is not one of the listed options", spec.label, value))
                })?;
            Ok(FeatureValue::Code(code))
        }
        Control::Integer { min, max, .. } => {
            let code = value
                .as_code()
                .ok_or_else(|| AppError::invalid_input(format!("{}: {} is not a whole number", spec.label, value)))?;
            if code < min || code > max {
                return Err(AppError::invalid_input(format!(
                    "{}: {} is outside {}..={}",
                    spec.label, code, min, max
                )));
            }
            Ok(FeatureValue::Code(code))
        }
        Control::Decimal { min, max, .. } => {
            let v = value.as_f64();
            if !v.is_finite() || v < min || v > max {
                return Err(AppError::invalid_input(format!(
                    "{}: {} is outside {}..={}",
                    spec.label, value, min, max
                )));
            }
            Ok(FeatureValue::Measure(v))
        }
    }
}

/// Turns submitted form values into a record. Every value must belong to a
/// known control and sit inside its domain; absent fields are left absent.
pub fn collect(values: &HashMap<String, FeatureValue>) -> Result<FeatureRecord, AppError> {
    let mut record = FeatureRecord::new();
    for (name, value) in values {
        let spec = field(name).ok_or_else(|| AppError::invalid_input(format!("Unknown form field {}", name)))?;
        record.insert(spec.name, check(spec, *value)?);
    }
    Ok(record)
}

/// `name=label` for every select field present in `record`, in form order.
/// Codes without a table entry show as `"Unknown"`.
pub fn describe_choices(record: &FeatureRecord) -> String {
    fields()
        .filter_map(|f| match f.control {
            Control::Select { choices, .. } => {
                let code = record.get(f.name)?.as_code()?;
                Some(format!("{}={}", f.name, label_for(choices, code)))
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn schema_has_thirty_six_unique_fields() {
        let names: Vec<_> = fields().map(|f| f.name).collect();
        assert_eq!(names.len(), 36);
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), 36);
    }

    #[test]
    fn unknown_codes_resolve_to_sentinel() {
        assert_eq!(label_for(COURSE, 9119), "Informatics Engineering");
        assert_eq!(label_for(COURSE, 1234), UNKNOWN_LABEL);
        assert_eq!(label_for(MARITAL_STATUS, 0), UNKNOWN_LABEL);
    }

    #[test]
    fn describes_selected_choices_by_label() {
        let mut record = default_record();
        record.insert("Course", FeatureValue::Code(9119));
        let text = describe_choices(&record);
        assert!(text.contains("Course=Informatics Engineering"), "{}", text);
        assert!(text.contains("Gender=Male"), "{}", text);
        assert!(!text.contains("Age_at_enrollment"), "{}", text);

        record.insert("Course", FeatureValue::Code(1234));
        assert!(describe_choices(&record).contains("Course=Unknown"));
    }

    #[test]
    fn defaults_fall_inside_their_own_domains() {
        let record = default_record();
        assert_eq!(record.len(), 36);
        let values: HashMap<String, FeatureValue> = record.iter().map(|(k, v)| (k.to_string(), v)).collect();
        assert_eq!(collect(&values).unwrap(), record);
    }

    #[test]
    fn whole_floats_are_accepted_as_codes() {
        let values = HashMap::from([("Age_at_enrollment".to_string(), FeatureValue::Measure(21.0))]);
        let record = collect(&values).unwrap();
        assert_eq!(record.get("Age_at_enrollment"), Some(FeatureValue::Code(21)));
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        let cases = [
            ("Age_at_enrollment", FeatureValue::Code(14)),
            ("Age_at_enrollment", FeatureValue::Measure(20.5)),
            ("Inflation_rate", FeatureValue::Measure(-5.1)),
            ("GDP", FeatureValue::Measure(f64::NAN)),
            ("Course", FeatureValue::Code(1)),
            ("Debtor", FeatureValue::Code(2)),
            ("Fathers_occupation", FeatureValue::Code(196)),
        ];
        for (name, value) in cases {
            let values = HashMap::from([(name.to_string(), value)]);
            let err = collect(&values).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidInput, "{} = {}", name, value);
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let values = HashMap::from([("Shoe_size".to_string(), FeatureValue::Code(42))]);
        assert!(collect(&values).unwrap_err().message.contains("Shoe_size"));
    }

    #[test]
    fn boundaries_are_inclusive() {
        let values = HashMap::from([
            ("Inflation_rate".to_string(), FeatureValue::Measure(-5.0)),
            ("Age_at_enrollment".to_string(), FeatureValue::Code(70)),
            ("Mothers_occupation".to_string(), FeatureValue::Code(0)),
        ]);
        assert_eq!(collect(&values).unwrap().len(), 3);
    }
}
