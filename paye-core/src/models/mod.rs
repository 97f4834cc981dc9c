mod bracket_schedule;
mod calculation_result;
mod estimator_input;
mod income_profile;
mod period;
mod regime;
mod relief;
mod tax_bracket;
mod user_type;

pub use bracket_schedule::{BracketSchedule, ScheduleError};
pub use calculation_result::{CalculationResult, Evaluation, RegimeComparison};
pub use estimator_input::{EstimatorInput, InputFields, SalaryFields, SelfEmployedFields};
pub use income_profile::{IncomeProfile, SalaryIncome, SelfEmployedIncome};
pub use period::Period;
pub use regime::{FlatReliefRules, Regime, RegimeRules, ReliefRules};
pub use relief::{ReliefBreakdown, ReliefConfig, ReliefKind};
pub use tax_bracket::TaxBracket;
pub use user_type::UserType;
