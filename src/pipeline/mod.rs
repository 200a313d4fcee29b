pub mod orchestrator;
pub mod stage1_parse;
pub mod stage2_diplotype;
pub mod stage3_risk;
pub mod stage4_recommend;
pub mod stage5_explain;
