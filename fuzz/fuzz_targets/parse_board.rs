#![no_main]
use caissa::chess::board::Board;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(board) = Board::from_placement(input) {
        // Printing the board back yields a canonical placement that parses to
        // the same board.
        let placement = board.to_string();
        assert_eq!(Board::from_placement(&placement).unwrap(), board);
    }
});
