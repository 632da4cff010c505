//! Parsing of A1-style cell references

/// Parse a reference like "B3" or "$B$3" into zero-based (row, col).
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for ch in cell_ref.trim().chars() {
        match ch {
            '$' => continue,
            'A'..='Z' | 'a'..='z' if !saw_row => {
                let upper = ch.to_ascii_uppercase();
                col = col.checked_mul(26)?.checked_add(upper as u32 - 'A' as u32 + 1)?;
                saw_col = true;
            }
            '0'..='9' if saw_col => {
                row = row.checked_mul(10)?.checked_add(ch as u32 - '0' as u32)?;
                saw_row = true;
            }
            _ => return None,
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }

    Some((row - 1, col - 1))
}

/// Parse "A1:C2" into zero-based (row1, row2, col1, col2)
pub fn parse_cell_range(start: &str, end: &str) -> Option<(u32, u32, u32, u32)> {
    let (row1, col1) = parse_cell_ref(start)?;
    let (row2, col2) = parse_cell_ref(end)?;
    Some((row1, row2, col1, col2))
}
