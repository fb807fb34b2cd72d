use tfguard_types::{Finding, Severity, TfguardData, Verdict};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub notice: u32,
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Notice => counts.notice += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    /// Summary data; `data.errors` holds tool errors, which are not findings.
    pub data: TfguardData,
    pub counts: SeverityCounts,
}

impl DomainReport {
    pub fn has_errors(&self) -> bool {
        !self.data.errors.is_empty()
    }
}
