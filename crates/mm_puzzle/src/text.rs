//! UI strings. The game ships a single language.

/// Game title.
pub const TITLE: &str = "M&M PUZZLE";
/// Subtitle on the home screen.
pub const TAGLINE: &str = "عالم الأبطال الصغار";
/// Home action: start playing.
pub const PLAY_NOW: &str = "ابدأ اللعب الآن";
/// Home action: play with a friend.
pub const PLAY_WITH_FRIEND: &str = "اللعب مع صديق";
/// Credit line on the home screen.
pub const CREDIT: &str = "المطور: سام جميل القدسي";

/// Level select heading.
pub const CHOOSE_ISLAND: &str = "اختر جزيرة التحدي";

/// Discovery heading.
pub const SEARCHING: &str = "جاري البحث عن أبطال...";
/// Discovery helper line.
pub const ASK_FRIEND: &str = "اطلب من صديقك فتح اللعبة أيضاً";

/// Playing: hint button.
pub const HINT: &str = "تلميح";
/// Playing: home button.
pub const HOME: &str = "الرئيسية";
/// Playing: "of N" puzzle counter suffix.
pub const OF: &str = "من";

/// Success feedback after a correct answer.
pub const FEEDBACK_SUCCESS: &str = "عبقري! 🌟";
/// Error feedback after a wrong answer.
pub const FEEDBACK_RETRY: &str = "حاول مجدداً! 💡";

/// Confirmation asked before leaving a level attempt.
pub const CONFIRM_EXIT: &str = "هل تريد حقاً الخروج من التحدي؟";

/// Notice shown when puzzle loading fails.
pub const LOAD_FAILED: &str = "حدث خطأ في تحميل الألغاز، يرجى المحاولة لاحقاً";
/// Notice shown when the last life is lost.
pub const OUT_OF_ATTEMPTS: &str = "انتهت المحاولات! حاول مرة أخرى في مستوى جديد.";

/// Loading overlay headline.
pub const LOADING: &str = "جاري تجهيز جزر الذكاء...";
/// Loading overlay sub line.
pub const LOADING_WAIT: &str = "انتظر قليلاً أيها البطل";

/// Results headline.
pub const RESULTS_TITLE: &str = "عبقري مذهل!";
/// Results sub line.
pub const RESULTS_SUBTITLE: &str = "لقد حققت فوزاً ساحقاً";
/// Results score caption.
pub const NEW_BALANCE: &str = "رصيدك الجديد:";
/// Results action: new challenge.
pub const NEW_CHALLENGE: &str = "تحدي جديد";
/// Results action: back home.
pub const RETURN_HOME: &str = "العودة للشاشة الرئيسية";
