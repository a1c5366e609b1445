//! Tests for guess application and game lifecycle.

use hangman::{Game, GameError, GameSnapshot, GameStatus, GuessOutcome};

#[test]
fn test_new_game_is_masked_and_active() {
    let game = Game::new("rust", 6).expect("Create failed");
    assert_eq!(game.revealed_word(), "____");
    assert_eq!(*game.attempts_remaining(), 6);
    assert_eq!(*game.attempts_allowed(), 6);
    assert!(!*game.game_over());
    assert!(game.moves().is_empty());
    assert_eq!(game.status(), GameStatus::Active);
}

#[test]
fn test_new_game_empty_target_fails() {
    let result = Game::new("", 5);
    assert_eq!(result.err(), Some(GameError::EmptyTarget));
}

#[test]
fn test_letter_hit_charges_each_mismatched_position() {
    let mut game = Game::new("cat", 5).expect("Create failed");
    let outcome = game.apply_guess("a").expect("Guess failed");

    assert_eq!(game.revealed_word(), "_a_");
    assert_eq!(*game.attempts_remaining(), 3);
    assert_eq!(game.status(), GameStatus::Active);
    // Last position examined ('t') did not match.
    assert_eq!(outcome, GuessOutcome::Miss);
    assert_eq!(game.moves(), &vec!["Guess: 'a', Result: '_a_'".to_string()]);
}

#[test]
fn test_round_message_follows_last_position() {
    let mut game = Game::new("cat", 10).expect("Create failed");
    let outcome = game.apply_guess("t").expect("Guess failed");
    assert_eq!(outcome, GuessOutcome::Hit);
    assert_eq!(outcome.to_string(), "Hit!");
}

#[test]
fn test_letter_match_is_case_insensitive_and_keeps_target_case() {
    let mut game = Game::new("Anna", 10).expect("Create failed");
    game.apply_guess("a").expect("Guess failed");
    assert_eq!(game.revealed_word(), "A__a");

    game.apply_guess("N").expect("Guess failed");
    assert_eq!(game.revealed_word(), "Anna");
    assert_eq!(game.status(), GameStatus::Won);
}

#[test]
fn test_full_word_guess_wins_at_one_attempt() {
    let mut game = Game::new("cat", 1).expect("Create failed");
    let outcome = game.apply_guess("cat").expect("Guess failed");

    assert_eq!(outcome, GuessOutcome::Won);
    assert_eq!(outcome.to_string(), "You win!");
    assert!(*game.game_over());
    assert!(*game.won());
    assert_eq!(*game.attempts_remaining(), 1);
    assert_eq!(game.moves().last().map(String::as_str), Some("You got the whole word! You win!"));
}

#[test]
fn test_full_word_guess_is_case_sensitive() {
    let mut game = Game::new("cat", 5).expect("Create failed");
    let result = game.apply_guess("CAT");
    assert_eq!(result, Err(GameError::InvalidGuess));
    assert!(!*game.game_over());
}

#[test]
fn test_miss_drops_below_one_and_loses() {
    let mut game = Game::new("cat", 1).expect("Create failed");
    let outcome = game.apply_guess("z").expect("Guess failed");

    assert_eq!(outcome, GuessOutcome::Lost);
    assert_eq!(outcome.to_string(), "Game over!");
    assert_eq!(*game.attempts_remaining(), -2);
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.guesses_used(), 3);
    assert_eq!(game.moves(), &vec!["Guess: 'z', Result: '___', Game over!".to_string()]);
}

#[test]
fn test_reveal_completion_wins_with_suffix() {
    let mut game = Game::new("aa", 3).expect("Create failed");
    let outcome = game.apply_guess("a").expect("Guess failed");

    assert_eq!(outcome, GuessOutcome::Won);
    assert_eq!(*game.attempts_remaining(), 3);
    assert_eq!(game.moves(), &vec!["Guess: 'a', Result: 'aa', You win!".to_string()]);
}

#[test]
fn test_invalid_guess_shapes_rejected_without_mutation() {
    let mut game = Game::new("cat", 5).expect("Create failed");
    for guess in ["", "ab", "1", "?", "ca"] {
        assert_eq!(game.apply_guess(guess), Err(GameError::InvalidGuess), "guess {guess:?}");
    }
    assert_eq!(*game.attempts_remaining(), 5);
    assert!(game.moves().is_empty());
}

#[test]
fn test_finished_game_is_frozen() {
    let mut game = Game::new("cat", 5).expect("Create failed");
    game.apply_guess("cat").expect("Guess failed");
    let before = game.clone();

    assert_eq!(game.apply_guess("z"), Ok(GuessOutcome::AlreadyOver));
    assert_eq!(game.apply_guess("not even valid"), Ok(GuessOutcome::AlreadyOver));
    assert_eq!(game, before);
}

#[test]
fn test_history_is_chronological() {
    let mut game = Game::new("banana", 40).expect("Create failed");
    game.apply_guess("b").expect("Guess failed");
    game.apply_guess("n").expect("Guess failed");
    game.apply_guess("a").expect("Guess failed");

    assert_eq!(
        game.moves(),
        &vec![
            "Guess: 'b', Result: 'b_____'".to_string(),
            "Guess: 'n', Result: 'b_n_n_'".to_string(),
            "Guess: 'a', Result: 'banana', You win!".to_string(),
        ]
    );
}

#[test]
fn test_revealed_length_tracks_target_for_multibyte_words() {
    let mut game = Game::new("Ñandú", 20).expect("Create failed");
    assert_eq!(game.revealed_word().chars().count(), 5);
    game.apply_guess("ñ").expect("Guess failed");
    assert_eq!(game.revealed_word(), "Ñ____");
    assert_eq!(game.revealed_word().chars().count(), game.target().chars().count());
}

#[test]
fn test_restore_rejects_mismatched_lengths() {
    let snapshot = GameSnapshot {
        target: "cat".to_string(),
        revealed_word: "__".to_string(),
        attempts_allowed: 5,
        attempts_remaining: 5,
        game_over: false,
        won: false,
        moves: Vec::new(),
    };
    let result = Game::restore(snapshot);
    assert!(matches!(result, Err(GameError::CorruptState { .. })));
}

#[test]
fn test_restore_resumes_play() {
    let mut saved = Game::new("cat", 5).expect("Create failed");
    saved.apply_guess("c").expect("Guess failed");

    let mut restored = Game::restore(saved.snapshot()).expect("Restore failed");
    assert_eq!(restored, saved);

    restored.apply_guess("a").expect("Guess failed");
    assert_eq!(restored.revealed_word(), "ca_");
    assert_eq!(restored.moves().len(), 2);
}

#[test]
fn test_extreme_attempt_counts_do_not_overflow() {
    let mut floor = Game::new("cat", i32::MIN).expect("Create failed");
    let outcome = floor.apply_guess("z").expect("Guess failed");
    assert_eq!(outcome, GuessOutcome::Lost);
    assert_eq!(*floor.attempts_remaining(), i32::MIN);
    assert_eq!(floor.guesses_used(), 0);

    let mut ceiling = Game::new("cat", i32::MAX).expect("Create failed");
    ceiling.apply_guess("z").expect("Guess failed");
    assert_eq!(*ceiling.attempts_remaining(), i32::MAX - 3);
    assert_eq!(ceiling.guesses_used(), 3);
    assert_eq!(ceiling.status(), GameStatus::Active);
}
