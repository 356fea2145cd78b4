/// 业务错误码，随 `ApiResponse.code` 返回给前端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    ValidationFailed = 1010,
    CsrfTokenInvalid = 1011,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 用户与认证
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNameAlreadyExists = 2002,
    UserNotFound = 2003,
    UserInfoMissing = 2004,
    UserInfoSaveFailed = 2005,
    UserDeleteFailed = 2006,
    LogoutFailed = 2007,

    // 课程
    CourseNotFound = 3000,
    CoursePermissionDenied = 3001,
    CourseCreationFailed = 3002,
    CourseUpdateFailed = 3003,
    CourseDeleteFailed = 3004,

    // 选课
    EnrollmentRejected = 4000,
    EnrollmentFailed = 4001,

    // 练习题
    ExerciseNotFound = 5000,
    ExerciseCreationFailed = 5001,
    ExerciseDeleteFailed = 5002,
    AnswerFailed = 5003,
    AlreadyAnswered = 5004,
    NotEnrolled = 5005,

    // 课程材料
    MaterialNotFound = 6000,
    MaterialCreationFailed = 6001,
    MaterialDeleteFailed = 6002,
}
