//! FILENAME: core/subtable-engine/src/definition.rs
//! Report table identities and the fixed report vocabulary.
//!
//! Column labels and narrative cell labels are part of the report format and
//! are not configurable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four report tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableId {
    /// 6.1 - patent documentation, one narrative row per patent.
    Narrative61,
    /// 6.4 - published documents per classifier, country and application year.
    ClassifierYears64,
    /// 6.5 - mutual patenting activity between countries.
    Bilateral65,
    /// 6.6 - geography of patenting.
    Geography66,
}

impl TableId {
    pub const ALL: [TableId; 4] = [
        TableId::Narrative61,
        TableId::ClassifierYears64,
        TableId::Bilateral65,
        TableId::Geography66,
    ];

    /// Report number used in output file names (`OUT61.xlsx`).
    pub fn number(&self) -> &'static str {
        match self {
            TableId::Narrative61 => "61",
            TableId::ClassifierYears64 => "64",
            TableId::Bilateral65 => "65",
            TableId::Geography66 => "66",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TableId::Narrative61 => "Patent documentation",
            TableId::ClassifierYears64 => "Published documents by application year",
            TableId::Bilateral65 => "Mutual patenting activity",
            TableId::Geography66 => "Geography of patenting",
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.number();
        write!(f, "{}.{}", &n[..1], &n[1..])
    }
}

impl FromStr for TableId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
        TableId::ALL
            .iter()
            .copied()
            .find(|t| t.number() == normalized)
            .ok_or_else(|| format!("unknown table '{}' (use 61, 64, 65 or 66)", s))
    }
}

// ============================================================================
// TABLE 6.1 VOCABULARY
// ============================================================================

pub mod narrative {
    pub const COL_DOCUMENT: &str =
        "Страна выдачи,\nномер и вид охранного документа.\nКлассификационный индекс";
    pub const COL_APPLICANT: &str = "Заявитель (патентообладатель); страна.\nНомер заявки, дата приоритета, конвенционный приоритет,\nдата публикации";
    pub const COL_TITLE: &str = "Название изобретения\n(полной модели, образца)";
    pub const COL_STATUS: &str = "Сведения о действии охранного документа\nили причина его аннулирования";

    pub const LABEL_IPC: &str = "\nМПК: ";
    pub const LABEL_ALSO_PUBLISHED: &str = "\nТакже опубликовано, как: ";
    pub const LABEL_APPLICANTS: &str = "Заявитель(и ); страна: ";
    pub const LABEL_INVENTORS: &str = ". \nИзобретатель(и): ";
    pub const LABEL_APPLICATION: &str = "\nЗаявка: ";
    pub const LABEL_PRIORITY_DATE: &str = "\nДата приоритета: ";
    pub const LABEL_PRIORITY_DOCS: &str = "\nПриоритетные документы:\n";
    pub const LABEL_PUBLISHED: &str = "\nОпубликовано: ";
}

// ============================================================================
// TABLE 6.4 VOCABULARY
// ============================================================================

pub mod classifier_years {
    pub const GROUP_YEARS: &str = "Количество патентов, опубликованных заявок по годам подачи заявки (исключая патенты-аналоги)";
    pub const INDEX_OBJECT: &str = "Объект техники и его составные части";
    pub const INDEX_COUNTRY: &str = "Страна";
}

// ============================================================================
// TABLE 6.5 VOCABULARY
// ============================================================================

pub mod bilateral {
    pub const GROUP_GRANT_COUNTRY: &str = "Страна патентования";
    pub const GROUP_PATENT_COUNT: &str = "Количество патентов";
    pub const SUB_NATIONAL: &str = "Национальных \nпатентов";
    pub const SUB_ABROAD: &str = "Запатентовано \nв других \nстранах";
    pub const LEVEL_APPLICANT: &str = "Национальная \nпринадлежность \nзаявителя";
    pub const COL_GRAND_TOTAL: &str = "Всего";
    pub const ROW_TOTAL: &str = "Итого";
}

// ============================================================================
// TABLE 6.6 VOCABULARY
// ============================================================================

pub mod geography {
    pub const COL_OWNER: &str = "Наименование фирмы-патентовладельца";
    pub const COL_SOLUTION: &str = "Наименование технического решения (изобретения)";
    pub const COL_PRIMARY_APPLICATION: &str = "Номер первичной заявки";
    pub const COL_PRIORITY_DATE: &str = "Дата приоритета";
    pub const COL_PRIMARY_PUBLICATION: &str = "Дата публикации первичной заявки";
    pub const GROUP_COUNTRIES: &str =
        "Номера выданных патентов (поданных заявок) по странам выдачи";
    /// Sub-label under the fixed left-block groups.
    pub const BLANK_SUB: &str = " ";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_numbers() {
        assert_eq!("61".parse::<TableId>().unwrap(), TableId::Narrative61);
        assert_eq!("6.5".parse::<TableId>().unwrap(), TableId::Bilateral65);
        assert!("62".parse::<TableId>().is_err());
    }

    #[test]
    fn displays_dotted_number() {
        assert_eq!(TableId::Geography66.to_string(), "6.6");
    }
}
