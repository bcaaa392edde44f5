#![no_main]
use caissa::chess::attacks::in_check;
use caissa::chess::board::Board;
use caissa::chess::castling::CastlingSide;
use caissa::chess::core::PieceKind;
use caissa::chess::legality::legal_moves;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::from_placement(input) else {
        return;
    };
    for (from, piece) in board.pieces() {
        let moves = legal_moves(&board, from).expect("square is occupied");
        assert!(!moves.contains(from));
        for &to in moves.destinations() {
            if piece.kind == PieceKind::King && CastlingSide::from_king_move(from, to).is_some() {
                continue;
            }
            let mut after = board;
            after.set(to, Some(piece.moved()));
            after.set(from, None);
            assert!(!in_check(&after, piece.owner), "{input}: {from}{to} exposes the king");
        }
    }
});
