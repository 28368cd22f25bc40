//! Fuzz target for appending device output and mapping coordinates.
//!
//! Drives a buffer with arbitrary chunks and layout changes, then checks the
//! offset/cursor round trip for every offset.

#![no_main]

use arbitrary::Arbitrary;
use console_buffer::ConsoleBuffer;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Append(String),
    Layout { wrap: bool, limit: u8 },
    Select { start: u16, end: u16 },
}

fuzz_target!(|ops: Vec<Op>| {
    let mut buffer = ConsoleBuffer::new();

    for op in ops.into_iter().take(64) {
        match op {
            Op::Append(text) => {
                buffer.append(&text);
            }
            Op::Layout { wrap, limit } => {
                // Zero is rejected and must leave the layout untouched.
                let _ = buffer.set_layout(wrap, usize::from(limit));
            }
            Op::Select { start, end } => {
                let _ = buffer.set_selection(usize::from(start), usize::from(end));
                let _ = buffer.selected_text();
            }
        }
    }

    assert!(buffer.total_rows() >= buffer.line_count());
    for index in 0..=buffer.len_chars() {
        let (col, row) = buffer.index_to_cursor(index).expect("valid index");
        let col = isize::try_from(col).expect("column fits");
        assert_eq!(buffer.cursor_to_index(col, row), Ok(index));
    }
});
