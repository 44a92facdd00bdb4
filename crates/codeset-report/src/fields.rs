//! Static registry of HL7 v2 fields bound to codesets.
//!
//! This is fixed reference data; it is rendered as the `<Fields>` block of
//! the transformer and never derived from a workbook.

/// How the transformer writes a mapped value into its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputType {
    /// Code only (`ID`/`IS` fields).
    Code,
    /// Code and display (`CE`/`CWE` and composite fields).
    CodedElement,
}

impl OutputType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::CodedElement => "CodedElement",
        }
    }
}

/// One field bound to a codeset sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    /// Segment and position, e.g. `OBX-8`.
    pub field: &'static str,
    /// Sheet key of the codeset, e.g. `CS_ABNORMAL_FLAG`.
    pub codeset: &'static str,
    pub output_type: OutputType,
    pub description: &'static str,
}

macro_rules! field {
    ($field:literal, $codeset:literal, $output:ident, $description:literal) => {
        FieldBinding {
            field: $field,
            codeset: $codeset,
            output_type: OutputType::$output,
            description: $description,
        }
    };
}

pub const FIELD_REGISTRY: &[FieldBinding] = &[
    field!("EVN-4", "CS_EVENT_REASON", Code, "Event Reason Code"),
    field!("PID-8", "CS_GENDER", Code, "Administrative Sex"),
    field!("PID-10", "CS_RACE", CodedElement, "Race"),
    field!("PID-15", "CS_LANGUAGE", CodedElement, "Primary Language"),
    field!("PID-16", "CS_MARITAL_STATUS", CodedElement, "Marital Status"),
    field!("PID-17", "CS_RELIGION", CodedElement, "Religion"),
    field!("PID-22", "CS_ETHNIC_GROUP", CodedElement, "Ethnic Group"),
    field!("PID-24", "CS_YES_NO_INDICATOR", Code, "Multiple Birth Indicator"),
    field!("PID-26", "CS_CITIZENSHIP", CodedElement, "Citizenship"),
    field!("PID-27", "CS_VETERANS_MILITARY_STATUS", CodedElement, "Veterans Military Status"),
    field!("PID-28", "CS_NATIONALITY", CodedElement, "Nationality"),
    field!("PID-30", "CS_YES_NO_INDICATOR", Code, "Patient Death Indicator"),
    field!("PID-32", "CS_IDENTITY_RELIABILITY", Code, "Identity Reliability Code"),
    field!("PID-35", "CS_SPECIES", CodedElement, "Species Code"),
    field!("PD1-2", "CS_LIVING_ARRANGEMENT", Code, "Living Arrangement"),
    field!("PD1-12", "CS_YES_NO_INDICATOR", Code, "Protection Indicator"),
    field!("PD1-16", "CS_IMMUNIZATION_REGISTRY_STATUS", Code, "Immunization Registry Status"),
    field!("NK1-3", "CS_RELATIONSHIP", CodedElement, "Relationship"),
    field!("NK1-7", "CS_CONTACT_ROLE", CodedElement, "Contact Role"),
    field!("NK1-15", "CS_GENDER", Code, "Administrative Sex"),
    field!("PV1-2", "CS_PATIENT_CLASS", Code, "Patient Class"),
    field!("PV1-3", "CS_CLINIC", CodedElement, "Assigned Patient Location"),
    field!("PV1-4", "CS_ADMISSION_TYPE", Code, "Admission Type"),
    field!("PV1-10", "CS_HOSPITAL_SERVICE", Code, "Hospital Service"),
    field!("PV1-14", "CS_ADMIT_SOURCE", Code, "Admit Source"),
    field!("PV1-15", "CS_AMBULATORY_STATUS", Code, "Ambulatory Status"),
    field!("PV1-16", "CS_VIP_INDICATOR", Code, "VIP Indicator"),
    field!("PV1-18", "CS_PATIENT_TYPE", Code, "Patient Type"),
    field!("PV1-20", "CS_FINANCIAL_CLASS", CodedElement, "Financial Class"),
    field!("PV1-36", "CS_DISCHARGE_DISPOSITION", Code, "Discharge Disposition"),
    field!("PV1-37", "CS_DISCHARGED_TO_LOCATION", CodedElement, "Discharged to Location"),
    field!("PV1-39", "CS_SERVICING_FACILITY", Code, "Servicing Facility"),
    field!("PV1-41", "CS_ACCOUNT_STATUS", Code, "Account Status"),
    field!("PV2-3", "CS_ADMIT_REASON", CodedElement, "Admit Reason"),
    field!("PV2-7", "CS_VISIT_USER_CODE", Code, "Visit User Code"),
    field!("PV2-22", "CS_YES_NO_INDICATOR", Code, "Visit Protection Indicator"),
    field!("PV2-38", "CS_MODE_OF_ARRIVAL", CodedElement, "Mode of Arrival Code"),
    field!("AL1-2", "CS_ALLERGEN_TYPE", CodedElement, "Allergen Type Code"),
    field!("AL1-4", "CS_ALLERGY_SEVERITY", CodedElement, "Allergy Severity Code"),
    field!("DG1-3", "CS_DIAGNOSIS_CODE", CodedElement, "Diagnosis Code"),
    field!("DG1-6", "CS_DIAGNOSIS_TYPE", Code, "Diagnosis Type"),
    field!("PR1-3", "CS_PROCEDURE_CODE", CodedElement, "Procedure Code"),
    field!("PR1-6", "CS_PROCEDURE_FUNCTIONAL_TYPE", Code, "Procedure Functional Type"),
    field!("ROL-3", "CS_PROVIDER_ROLE", CodedElement, "Role"),
    field!("GT1-11", "CS_RELATIONSHIP", CodedElement, "Guarantor Relationship"),
    field!("IN1-2", "CS_INSURANCE_PLAN", CodedElement, "Insurance Plan ID"),
    field!("IN1-15", "CS_PLAN_TYPE", Code, "Plan Type"),
    field!("IN1-17", "CS_RELATIONSHIP", CodedElement, "Insured's Relationship to Patient"),
    field!("IN1-43", "CS_GENDER", Code, "Insured's Administrative Sex"),
    field!("ACC-2", "CS_ACCIDENT_TYPE", CodedElement, "Accident Code"),
    field!("ORC-1", "CS_ORDER_CONTROL", Code, "Order Control"),
    field!("ORC-5", "CS_ORDER_STATUS", Code, "Order Status"),
    field!("ORC-16", "CS_ORDER_CONTROL_REASON", CodedElement, "Order Control Code Reason"),
    field!("ORC-29", "CS_ORDER_TYPE", CodedElement, "Order Type"),
    field!("OBR-4", "CS_UNIVERSAL_SERVICE", CodedElement, "Universal Service Identifier"),
    field!("OBR-11", "CS_SPECIMEN_ACTION", Code, "Specimen Action Code"),
    field!("OBR-15", "CS_SPECIMEN_SOURCE", CodedElement, "Specimen Source"),
    field!("OBR-24", "CS_DIAGNOSTIC_SERVICE_SECTION", Code, "Diagnostic Serv Sect ID"),
    field!("OBR-25", "CS_RESULT_STATUS", Code, "Result Status"),
    field!("OBR-30", "CS_TRANSPORTATION_MODE", Code, "Transportation Mode"),
    field!("OBR-31", "CS_REASON_FOR_STUDY", CodedElement, "Reason for Study"),
    field!("OBX-2", "CS_VALUE_TYPE", Code, "Value Type"),
    field!("OBX-3", "CS_OBSERVATION_IDENTIFIER", CodedElement, "Observation Identifier"),
    field!("OBX-6", "CS_UNITS", CodedElement, "Units"),
    field!("OBX-8", "CS_ABNORMAL_FLAG", Code, "Abnormal Flags"),
    field!("OBX-10", "CS_NATURE_OF_ABNORMAL_TEST", Code, "Nature of Abnormal Test"),
    field!("OBX-11", "CS_OBSERVATION_RESULT_STATUS", Code, "Observation Result Status"),
    field!("OBX-17", "CS_OBSERVATION_METHOD", CodedElement, "Observation Method"),
    field!("SPM-4", "CS_SPECIMEN_TYPE", CodedElement, "Specimen Type"),
    field!("SPM-8", "CS_SPECIMEN_SOURCE_SITE", CodedElement, "Specimen Source Site"),
    field!("SPM-11", "CS_SPECIMEN_ROLE", CodedElement, "Specimen Role"),
    field!("SPM-21", "CS_SPECIMEN_REJECT_REASON", CodedElement, "Specimen Reject Reason"),
    field!("SPM-24", "CS_SPECIMEN_CONDITION", CodedElement, "Specimen Condition"),
    field!("RXA-5", "CS_VACCINE_ADMINISTERED", CodedElement, "Administered Code"),
    field!("RXA-20", "CS_COMPLETION_STATUS", Code, "Completion Status"),
    field!("RXA-21", "CS_ACTION_CODE", Code, "Action Code"),
    field!("RXE-2", "CS_GIVE_CODE", CodedElement, "Give Code"),
    field!("RXE-5", "CS_DOSAGE_FORM", CodedElement, "Give Dosage Form"),
    field!("RXR-1", "CS_ROUTE", CodedElement, "Route"),
    field!("RXR-2", "CS_ADMINISTRATION_SITE", CodedElement, "Administration Site"),
    field!("TXA-2", "CS_DOCUMENT_TYPE", Code, "Document Type"),
    field!("TXA-17", "CS_DOCUMENT_COMPLETION_STATUS", Code, "Document Completion Status"),
    field!("TXA-19", "CS_DOCUMENT_AVAILABILITY_STATUS", Code, "Document Availability Status"),
    field!("SCH-7", "CS_APPOINTMENT_REASON", CodedElement, "Appointment Reason"),
    field!("SCH-8", "CS_APPOINTMENT_TYPE", CodedElement, "Appointment Type"),
    field!("SCH-25", "CS_FILLER_STATUS", CodedElement, "Filler Status Code"),
];
