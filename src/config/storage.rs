/// Best-score storage configuration.

/// Key under which the best score is kept inside the score file.
pub const BEST_SCORE_KEY: &str = "whack-a-mole-highscore";

/// Default score file, relative to the working directory.
pub const DEFAULT_SCORE_FILE: &str = "whack-grid-score.json";

/// Environment variable overriding the score file path.
pub const SCORE_FILE_ENV: &str = "WHACK_SCORE_FILE";
