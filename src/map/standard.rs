//! The reference 42-territory world map used by the Warlight host.
//!
//! Six groups: North America (1-9), South America (10-13), Europe (14-20),
//! Africa (21-26), Asia (27-38) and Australia (39-42).

/// `setup_map super_regions` payload: pairs of group id and bonus.
pub const SUPER_REGIONS: &str = "1 5 2 2 3 5 4 3 5 7 6 2";

/// `setup_map regions` payload: pairs of territory id and group id.
pub const REGIONS: &str = "1 1 2 1 3 1 4 1 5 1 6 1 7 1 8 1 9 1 \
    10 2 11 2 12 2 13 2 \
    14 3 15 3 16 3 17 3 18 3 19 3 20 3 \
    21 4 22 4 23 4 24 4 25 4 26 4 \
    27 5 28 5 29 5 30 5 31 5 32 5 33 5 34 5 35 5 36 5 37 5 38 5 \
    39 6 40 6 41 6 42 6";

/// `setup_map neighbors` payload: territory id followed by a comma list.
///
/// Each border appears once; the map mirrors it.
pub const NEIGHBORS: &str = "1 2,4,30 2 4,3,5 3 5,6,14 4 5,7 \
    5 6,7,8 6 8 7 8,9 8 9 9 10 10 \
    11,12 11 12,13 12 13,21 14 15,16 \
    15 16,18,19 16 17 17 19,20,27,32,36 \
    18 19,20,21 19 20 20 21,22,36 21 \
    22,23,24 22 23,36 23 24,25,26,36 \
    24 25 25 26 27 28,32,33 28 \
    29,31,33,34 29 30,31 30 31,34,35 \
    31 34 32 33,36,37 33 34,37,38 34 \
    35 36 37 37 38 38 39 39 40,41 40 \
    41,42 41 42";

/// Player name the host assigns to the first seat.
pub const PLAYER_NAME: &str = "player1";

/// Player name the host assigns to the second seat.
pub const OPPONENT_NAME: &str = "player2";

/// Time budget (ms) the host gives for starting picks.
pub const PICK_STARTING_TIME: u64 = 10_000;

/// Time budget (ms) the host gives for each `go` command.
pub const GO_TIME: u64 = 2000;

/// Starting candidates offered in a recorded game.
pub const SAMPLE_CANDIDATES: &str = "3 2 10 12 20 17 24 25 31 36 42 39";

/// `update_map` payload from the same game, a few turns in.
pub const SAMPLE_UPDATE: &str = "3 player1 1 14 player1 3 16 player1 4 17 player1 4 \
    36 player1 4 37 player1 4 38 player1 4 39 player1 4 41 player1 29 42 player1 35 \
    2 neutral 2 5 neutral 2 6 neutral 2 15 neutral 2 19 neutral 2 20 neutral 2 \
    27 neutral 2 32 neutral 2 22 neutral 2 23 player2 4 33 player2 6 40 neutral 2";

/// `opponent_moves` payload preceding [`SAMPLE_UPDATE`].
pub const SAMPLE_OPPONENT_MOVES: &str = "player2 place_armies 23 2 \
    player2 attack/transfer 23 21 5 player2 attack/transfer 25 23 2 \
    player2 attack/transfer 33 28 3 player2 attack/transfer 34 33 5";

/// Armies available in the sample turn.
pub const SAMPLE_ARMIES: u32 = 5;
