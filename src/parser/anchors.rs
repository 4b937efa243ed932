use serde_json::Value;

/// Which scraped page a block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Main,
    Rankings,
    Admissions,
    Academics,
}

/// Section anchors the extractor understands. Anything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    // main page
    Editorial,
    FromTheSchool,
    About,
    Admissions,
    Cost,
    Academics,
    Students,
    CampusLife,
    After,
    // rankings page
    Rankings,
    // admissions page
    AdmissionsDeadlines,
    // academics page
    AcademicStatistics,
    AboutTheClasses,
    AboutTheProfessors,
}

const ALL: &[Anchor] = &[
    Anchor::Editorial,
    Anchor::FromTheSchool,
    Anchor::About,
    Anchor::Admissions,
    Anchor::Cost,
    Anchor::Academics,
    Anchor::Students,
    Anchor::CampusLife,
    Anchor::After,
    Anchor::Rankings,
    Anchor::AdmissionsDeadlines,
    Anchor::AcademicStatistics,
    Anchor::AboutTheClasses,
    Anchor::AboutTheProfessors,
];

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Editorial => "editorial",
            Anchor::FromTheSchool => "from-the-school",
            Anchor::About => "about",
            Anchor::Admissions => "admissions",
            Anchor::Cost => "cost",
            Anchor::Academics => "academics",
            Anchor::Students => "students",
            Anchor::CampusLife => "campus-life",
            Anchor::After => "after",
            Anchor::Rankings => "rankings",
            Anchor::AdmissionsDeadlines => "admissions-deadlines",
            Anchor::AcademicStatistics => "academic-statistics",
            Anchor::AboutTheClasses => "about-the-classes",
            Anchor::AboutTheProfessors => "about-the-professors",
        }
    }

    pub fn page(self) -> Page {
        match self {
            Anchor::Editorial
            | Anchor::FromTheSchool
            | Anchor::About
            | Anchor::Admissions
            | Anchor::Cost
            | Anchor::Academics
            | Anchor::Students
            | Anchor::CampusLife
            | Anchor::After => Page::Main,
            Anchor::Rankings => Page::Rankings,
            Anchor::AdmissionsDeadlines => Page::Admissions,
            Anchor::AcademicStatistics | Anchor::AboutTheClasses | Anchor::AboutTheProfessors => {
                Page::Academics
            }
        }
    }

    fn from_name(name: &str) -> Option<Anchor> {
        ALL.iter().copied().find(|a| a.as_str() == name)
    }

    /// Anchors are stored as a one-element list, e.g. `["editorial"]`.
    /// Returns `None` for unknown anchors and for anchors that belong to another page.
    pub fn detect(page: Page, raw: &Value) -> Option<Anchor> {
        let name = match raw.as_array().map(Vec::as_slice) {
            Some([Value::String(name)]) => name,
            _ => return None,
        };
        Anchor::from_name(name).filter(|a| a.page() == page)
    }
}
