// 报告调研的调度核心
//
// types      请求/响应数据契约
// generators 主题 → Prompt生成器（静态映射，编译期保证每个主题都有生成器）
// executors  dummyApi开关 → 执行器（首次生成与修订各一对实现）
// selection  修订选区的截断与拼接

pub mod executors;
pub mod generators;
pub mod selection;
pub mod types;
