//! Prompt builders for every AI-driven operation.
//!
//! All prompts ask for CSV with a header row and nothing else; the
//! structurer strips stray code fences before parsing anyway. Keeping
//! these as plain functions makes the exact wording testable.

use crate::types::FormulaKind;

/// Generic free-text to table conversion.
pub fn generic_transform(text: &str) -> String {
    format!(
        "Extract structured data from the following text and convert it into a well-formatted table.\n\
         If the text contains multiple items with similar properties, organize them into a coherent table with appropriate headers.\n\
         If there are key-value pairs, convert them into a table with columns for keys and values.\n\
         Your response should be formatted as a CSV string with the first row containing column headers.\n\
         Only respond with the CSV formatted data, no additional explanations.\n\n\
         Here's the text:\n\n{text}"
    )
}

/// Structured table of a known domain shape, optionally with a fixed column
/// list.
pub fn typed_table(text: &str, table_type: Option<&str>, columns: &[String]) -> String {
    let type_line = match table_type {
        Some(t) => format!("The data should be organized as a {t} table.\n"),
        None => String::new(),
    };
    let column_line = if columns.is_empty() {
        "Identify the most appropriate columns based on the content.".to_string()
    } else {
        format!(
            "Include specifically these columns in the resulting table: {}.",
            columns.join(", ")
        )
    };
    format!(
        "Extract structured data from the following text and convert it into a well-formatted table.\n\
         {type_line}{column_line}\n\
         Your response should be formatted as a CSV string with the first row containing column headers.\n\
         Only respond with the CSV formatted data, no additional explanations.\n\n\
         Here's the text:\n\n{text}"
    )
}

/// Entity extraction ("people", "companies", "products", ...).
pub fn entity_extraction(text: &str, entity_type: &str) -> String {
    format!(
        "Extract all {entity_type} from the following text.\n\
         For each {entity_type}, identify relevant attributes and properties.\n\
         Organize the extracted information into a table format with appropriate columns.\n\
         Your response should be formatted as a CSV string with the first row containing column headers.\n\
         Only respond with the CSV formatted data, no additional explanations.\n\n\
         Here's the text:\n\n{text}"
    )
}

/// File-derived text (plain text, PDF-extracted text, spreadsheet text).
pub fn file_extraction(content: &str) -> String {
    format!(
        "Extract structured tabular data from the following document text.\n\
         Identify tables, lists, or any structured information and convert it into a well-formatted table.\n\
         Format your response as a CSV string with the first row containing column headers.\n\
         Only respond with the CSV data, no additional explanations.\n\n\
         Here's the document content:\n\n{content}"
    )
}

/// Image structuring. The image itself travels as an inline part.
pub fn image_extraction() -> String {
    "Extract any tabular or structured data from this image.\n\
     If there's a table, extract all rows and columns with their data.\n\
     If there's no clear table but there is structured data, organize it into a logical table format.\n\
     Format your response as a CSV string with the first row containing column headers.\n\
     Only respond with the CSV data, no additional explanations."
        .to_string()
}

/// Repair of messy delimited text.
pub fn csv_cleanup(csv: &str) -> String {
    format!(
        "Parse and clean the following CSV data.\n\
         Fix any formatting issues, ensure consistent delimiters, and handle missing values.\n\
         Format your response as a clean CSV string with the first row containing column headers.\n\
         Only respond with the cleaned CSV data, no additional explanations.\n\n\
         Here's the CSV content:\n\n{csv}"
    )
}

/// Freeform table enhancement driven by a natural-language instruction.
pub fn enhance(csv: &str, instructions: &str) -> String {
    format!(
        "Enhance the following table data based on these instructions: \"{instructions}\"\n\n\
         Here's the current table data in CSV format:\n\n{csv}\n\n\
         Respond with the enhanced CSV data only, keeping the same column headers.\n\
         Only include the CSV data in your response, no explanations."
    )
}

/// Question answering over a table.
pub fn question(csv: &str, question: &str) -> String {
    format!(
        "Based on the following table data, answer this question: \"{question}\"\n\n\
         Table data (CSV format):\n{csv}\n\n\
         Provide a concise and accurate answer based only on the data provided."
    )
}

/// The comprehensive auto-clean instruction, fed through [`enhance`].
pub fn auto_clean_instruction() -> String {
    "Thoroughly clean and improve this table by:\n\
     1. Fixing any formatting inconsistencies\n\
     2. Standardizing date formats (to YYYY-MM-DD)\n\
     3. Standardizing numeric values (use proper decimal points)\n\
     4. Removing any duplicate rows\n\
     5. Filling in obvious missing values\n\
     6. Ensuring consistent capitalization in text fields\n\
     7. Correcting spelling errors\n\
     8. Removing any extraneous spaces or characters\n\
     9. Detecting and standardizing units (e.g., currency symbols)\n\
     10. Identifying and fixing any data type issues\n\
     Return the cleaned table data only, maintaining the original structure where possible."
        .to_string()
}

/// Expand a named formula into a table-edit instruction for [`enhance`].
pub fn formula_instruction(kind: FormulaKind, column: &str) -> String {
    match kind {
        FormulaKind::Sum => {
            format!("Calculate the sum of the {column} column and add a new row with the result.")
        }
        FormulaKind::Average => format!(
            "Calculate the average of the {column} column and add a new row with the result."
        ),
        FormulaKind::Max => format!(
            "Find the maximum value in the {column} column and add a new row with the result."
        ),
        FormulaKind::Min => format!(
            "Find the minimum value in the {column} column and add a new row with the result."
        ),
        FormulaKind::Count => format!(
            "Count the number of non-empty values in the {column} column and add a new row with the result."
        ),
        FormulaKind::Percentage => format!(
            "Calculate each value in the {column} column as a percentage of the total and add a new column with the results."
        ),
        FormulaKind::Growth => format!(
            "Calculate the growth rate between consecutive values in the {column} column and add a new column with the results."
        ),
    }
}

/// Follow-up question asking what an edit instruction changed.
pub fn explain_changes(instruction: &str) -> String {
    format!(
        "Explain briefly what changes were made to the table based on the instruction: \"{instruction}\". Keep the explanation concise."
    )
}

/// Follow-up question summarizing an auto-clean pass.
pub fn clean_summary() -> String {
    "What improvements and fixes were made to clean this table? List the main changes in a concise bullet-point format."
        .to_string()
}

/// Narrative analysis of a table.
pub fn data_story() -> String {
    "Analyze this table data and create a concise, insightful story about what the data reveals.\n\
     Include key patterns, trends, and notable insights. Format the response in 2-3 short paragraphs.\n\
     Focus on the most interesting aspects of the data."
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_transform_includes_text_and_csv_directive() {
        let prompt = generic_transform("Alice is 30");
        assert!(prompt.contains("Alice is 30"));
        assert!(prompt.contains("CSV"));
        assert!(prompt.contains("no additional explanations"));
    }

    #[test]
    fn test_typed_table_with_columns() {
        let prompt = typed_table(
            "some sales notes",
            Some("sales"),
            &["Product".to_string(), "Revenue".to_string()],
        );
        assert!(prompt.contains("organized as a sales table"));
        assert!(prompt.contains("these columns in the resulting table: Product, Revenue"));
    }

    #[test]
    fn test_typed_table_without_columns_auto_detects() {
        let prompt = typed_table("notes", None, &[]);
        assert!(prompt.contains("Identify the most appropriate columns"));
        assert!(!prompt.contains("organized as a"));
    }

    #[test]
    fn test_entity_extraction_names_entity_type() {
        let prompt = entity_extraction("Jane works at Acme", "people");
        assert!(prompt.contains("Extract all people"));
        assert!(prompt.contains("Jane works at Acme"));
    }

    #[test]
    fn test_formula_instructions() {
        assert_eq!(
            formula_instruction(FormulaKind::Sum, "Revenue"),
            "Calculate the sum of the Revenue column and add a new row with the result."
        );
        assert!(formula_instruction(FormulaKind::Percentage, "Sales").contains("new column"));
        assert!(formula_instruction(FormulaKind::Growth, "Sales").contains("consecutive values"));
    }

    #[test]
    fn test_auto_clean_instruction_covers_all_points() {
        let instruction = auto_clean_instruction();
        for point in 1..=10 {
            assert!(instruction.contains(&format!("{}.", point)));
        }
        assert!(instruction.contains("YYYY-MM-DD"));
    }
}
