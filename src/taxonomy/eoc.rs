use super::{Taxonomy, TaxonomyError};

/// Star-rating measures and their weights, in declaration order.
pub const MEASURES: &[(&str, f64)] = &[
    ("Breast Cancer Screening", 1.5),
    ("Colorectal Cancer Screening", 1.5),
    ("Annual Flu Vaccine", 1.0),
    ("Pneumonia Vaccination", 1.0),
    ("Monitoring Physical Activity", 1.0),
    ("Adult BMI Assessment", 1.0),
    ("Diabetes Care – Eye Exam", 1.5),
    ("Diabetes Care – Kidney Monitoring", 1.5),
    ("Diabetes Care – Blood Sugar Controlled", 3.0),
    ("Controlling Blood Pressure", 3.0),
    ("Rheumatoid Arthritis Management", 1.5),
    ("Osteoporosis Management Post-Fracture", 1.5),
    ("Pain Assessment", 1.0),
    ("Reducing the Risk of Falling", 1.0),
    ("Medication Reconciliation Post-Discharge", 1.0),
    ("Statin Therapy for Cardiovascular Disease", 1.5),
    ("Complaints About the Health/Drug Plan", 1.5),
    ("Members Choosing to Leave the Plan", 1.5),
    ("Plan Makes Timely Decisions About Appeals", 1.5),
    ("Reviewing Appeals Decisions", 1.5),
    ("Customer Service", 1.5),
    ("Call Center – Foreign Language Interpreter Availability", 1.0),
    ("Call Center – TTY Availability", 1.0),
    ("Drug Plan Customer Service", 1.5),
    ("Formulary Accuracy", 1.5),
    ("Prior Authorization & Pharmacy Network Info", 1.5),
    ("MTM Program Availability", 1.5),
    ("Disenrollment Info", 1.5),
    ("Access to Care", 1.5),
    ("Care Coordination", 1.5),
    ("Appointment Availability", 1.5),
    ("Needed Care", 1.5),
];

/// Keyword triggers. "Disenrollment Info" has no trigger of its own but still
/// counts toward the possible total.
pub const KEYWORDS: &[(&str, &str)] = &[
    ("flu vaccine", "Annual Flu Vaccine"),
    ("pneumonia", "Pneumonia Vaccination"),
    ("breast cancer", "Breast Cancer Screening"),
    ("colorectal cancer", "Colorectal Cancer Screening"),
    ("colonoscopy", "Colorectal Cancer Screening"),
    ("bmi", "Adult BMI Assessment"),
    ("physical activity", "Monitoring Physical Activity"),
    ("eye exam", "Diabetes Care – Eye Exam"),
    ("kidney", "Diabetes Care – Kidney Monitoring"),
    ("blood sugar", "Diabetes Care – Blood Sugar Controlled"),
    ("a1c", "Diabetes Care – Blood Sugar Controlled"),
    ("hypertension", "Controlling Blood Pressure"),
    ("blood pressure", "Controlling Blood Pressure"),
    ("arthritis", "Rheumatoid Arthritis Management"),
    ("osteoporosis", "Osteoporosis Management Post-Fracture"),
    ("pain", "Pain Assessment"),
    ("falls", "Reducing the Risk of Falling"),
    ("medication reconciliation", "Medication Reconciliation Post-Discharge"),
    ("statin", "Statin Therapy for Cardiovascular Disease"),
    ("complaint", "Complaints About the Health/Drug Plan"),
    ("disenroll", "Members Choosing to Leave the Plan"),
    ("appeal", "Plan Makes Timely Decisions About Appeals"),
    ("reviewing appeals", "Reviewing Appeals Decisions"),
    ("customer service", "Customer Service"),
    ("foreign language", "Call Center – Foreign Language Interpreter Availability"),
    ("tty", "Call Center – TTY Availability"),
    ("drug plan customer service", "Drug Plan Customer Service"),
    ("formulary", "Formulary Accuracy"),
    ("drug list", "Formulary Accuracy"),
    ("prior authorization", "Prior Authorization & Pharmacy Network Info"),
    ("pharmacy network", "Prior Authorization & Pharmacy Network Info"),
    ("mtm", "MTM Program Availability"),
    ("access to care", "Access to Care"),
    ("care coordination", "Care Coordination"),
    ("appointment", "Appointment Availability"),
    ("needed care", "Needed Care"),
    // multilingual plans advertise these alongside the interpreter line
    ("interpreters", "Call Center – Foreign Language Interpreter Availability"),
    ("translation services", "Call Center – Foreign Language Interpreter Availability"),
];

/// The Evidence of Coverage taxonomy the service scores against.
pub fn eoc_taxonomy() -> Result<Taxonomy, TaxonomyError> {
    let builder = MEASURES
        .iter()
        .fold(Taxonomy::builder(), |b, (name, weight)| b.measure(*name, *weight));
    KEYWORDS
        .iter()
        .fold(builder, |b, (keyword, measure)| b.keyword(*keyword, *measure))
        .build()
}
