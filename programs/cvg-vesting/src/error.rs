use anchor_lang::prelude::*;

/// Custom error codes for the CVG vesting program.
#[error_code]
pub enum VestingError {
    // State errors.
    #[msg("Presale round has not started")]
    PresaleNotStarted,

    #[msg("Presale round is finished")]
    PresaleRoundFinished,

    #[msg("A presale round is not finished")]
    PresaleRoundNotFinished,

    #[msg("Vesting is not open")]
    VestingNotOpen,

    #[msg("Vesting is not set")]
    VestingNotSet,

    #[msg("Vesting is already set")]
    VestingAlreadySet,

    #[msg("Vesting is already opened")]
    VestingAlreadyOpened,

    #[msg("Invalid round state transition")]
    InvalidStateTransition,

    // Authorization errors.
    #[msg("Unauthorized: admin signature required")]
    Unauthorized,

    #[msg("Position is not owned by the caller")]
    NotOwned,

    #[msg("Caller is not the team address")]
    NotTeam,

    #[msg("Caller is not the dao address")]
    NotDao,

    // Validation errors.
    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Invalid Merkle proof")]
    InvalidProof,

    #[msg("Amount below the tier minimum")]
    InsufficientAmount,

    #[msg("Amount above the tier maximum")]
    TooMuchQWl,

    #[msg("Already minted in this round")]
    AlreadyMinted,

    #[msg("CVG mint is not set")]
    CvgZero,

    #[msg("CVG mint is already set")]
    CvgAlreadySet,

    #[msg("Vault holds less CVG than the vesting totals")]
    NotEnoughCvg,

    #[msg("No funds to withdraw")]
    NoFunds,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Invalid tier")]
    InvalidTier,

    #[msg("Invalid cohort for this operation")]
    InvalidCohort,

    #[msg("Payment asset not accepted")]
    InvalidPaymentAsset,

    #[msg("Payment asset list is full")]
    PaymentAssetListFull,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Unknown pricing curve")]
    InvalidComposedFunction,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    #[msg("Duplicate position")]
    DuplicatePosition,

    #[msg("Position id does not match the next free id")]
    InvalidPositionId,

    // Accounting / capacity errors.
    #[msg("Nothing releasable")]
    NotReleasable,

    #[msg("Bond would exceed its max CVG to mint")]
    MaxCvgAlreadyMinted,

    #[msg("Deposit exceeds the per-deposit cap")]
    MaxPerDepositExceeded,

    #[msg("Output below the minimum requested")]
    SlippageExceeded,

    #[msg("Round supply would be exceeded")]
    RoundSupplyExceeded,

    #[msg("Math overflow")]
    MathOverflow,
}
